//! Law-checking helpers for capability implementations.
//!
//! A [`LawChecker`] compares the two sides of each law through an observation
//! function. Types with meaningful structural equality use
//! [`LawChecker::structural`]; types that can only be compared by behaviour
//! (such as [`Parser`](crate::instances::Parser)) use [`LawChecker::observing`].

use std::fmt;
use std::rc::Rc;

use crate::capability::{Alternative, Applicative, Functor, Kleisli, Monad, choose_first};
use crate::error::{EvalError, Result};
use crate::suspension::Suspension;
use crate::value::{Function, Value};

/// Compares law sides through an observation of type `O`.
pub struct LawChecker<F, O> {
    observe: Box<dyn Fn(&F) -> Result<O>>,
}

impl<F> LawChecker<F, F>
where
    F: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Compare values directly.
    pub fn structural() -> Self {
        Self {
            observe: Box::new(|value: &F| -> Result<F> { Ok(value.clone()) }),
        }
    }
}

impl<F, O> LawChecker<F, O>
where
    F: Clone + 'static,
    O: PartialEq + fmt::Debug,
{
    /// Compare values by `observe(value)`.
    pub fn observing(observe: impl Fn(&F) -> Result<O> + 'static) -> Self {
        Self {
            observe: Box::new(observe),
        }
    }

    fn same(&self, law: &'static str, left: &F, right: &F) -> Result<()> {
        let (left, right) = ((self.observe)(left)?, (self.observe)(right)?);
        if left == right {
            Ok(())
        } else {
            Err(EvalError::LawViolated {
                law,
                left: format!("{left:?}"),
                right: format!("{right:?}"),
            })
        }
    }
}

impl<F, O> LawChecker<F, O>
where
    F: Functor + Clone + 'static,
    O: PartialEq + fmt::Debug,
{
    /// `fa.fmap(id) == fa`
    pub fn functor_identity(&self, fa: &F) -> Result<()> {
        self.same("functor identity", &fa.fmap(&Function::identity())?, fa)
    }

    /// `fa.fmap(g . f) == fa.fmap(f).fmap(g)`
    pub fn functor_composition(&self, fa: &F, f: &Function, g: &Function) -> Result<()> {
        let left = fa.fmap(&Function::compose(g, f))?;
        let right = fa.fmap(f)?.fmap(g)?;
        self.same("functor composition", &left, &right)
    }

    /// Both functor laws.
    pub fn check_functor_laws(&self, fa: &F, f: &Function, g: &Function) -> Result<()> {
        self.functor_identity(fa)?;
        self.functor_composition(fa, f, g)
    }
}

impl<F, O> LawChecker<F, O>
where
    F: Applicative + Clone + 'static,
    O: PartialEq + fmt::Debug,
{
    /// `pure(id) <*> v == v`
    pub fn applicative_identity(&self, v: &F) -> Result<()> {
        let left = F::pure(Function::identity().into()).ap(&ready(v))?;
        self.same("applicative identity", &left, v)
    }

    /// `pure(f) <*> pure(x) == pure(f(x))`
    pub fn applicative_homomorphism(&self, f: &Function, x: &Value) -> Result<()> {
        let left = F::pure(f.clone().into()).ap(&Suspension::ready(F::pure(x.clone())))?;
        let right = F::pure(f.call(x.clone())?);
        self.same("applicative homomorphism", &left, &right)
    }

    /// `u <*> pure(y) == pure(|f| f(y)) <*> u`
    pub fn applicative_interchange(&self, u: &F, y: &Value) -> Result<()> {
        let left = u.ap(&Suspension::ready(F::pure(y.clone())))?;
        let y = y.clone();
        let apply_to_y = Function::new("apply_to", move |f| f.call(y.clone()));
        let right = F::pure(apply_to_y.into()).ap(&ready(u))?;
        self.same("applicative interchange", &left, &right)
    }

    /// `pure(.) <*> u <*> v <*> w == u <*> (v <*> w)`
    pub fn applicative_composition(&self, u: &F, v: &F, w: &F) -> Result<()> {
        let compose = Function::curried("compose", |outer, inner| {
            Ok(Function::compose(outer.as_function()?, inner.as_function()?).into())
        });
        let left = F::pure(compose.into())
            .ap(&ready(u))?
            .ap(&ready(v))?
            .ap(&ready(w))?;
        let right = u.ap(&Suspension::ready(v.ap(&ready(w))?))?;
        self.same("applicative composition", &left, &right)
    }

    /// All four applicative laws.
    ///
    /// `u` and `v` must wrap functions and `w` values they accept; `x` feeds
    /// homomorphism and interchange.
    pub fn check_applicative_laws(
        &self,
        u: &F,
        v: &F,
        w: &F,
        f: &Function,
        x: &Value,
    ) -> Result<()> {
        self.applicative_identity(w)?;
        self.applicative_homomorphism(f, x)?;
        self.applicative_interchange(u, x)?;
        self.applicative_composition(u, v, w)
    }
}

impl<F, O> LawChecker<F, O>
where
    F: Alternative,
    O: PartialEq + fmt::Debug,
{
    /// `empty <|> x == x`
    pub fn alternative_left_identity(&self, x: &F) -> Result<()> {
        let left = choose_first(&F::empty(), &ready(x))?;
        self.same("alternative left identity", &left, x)
    }

    /// `x <|> empty == x`
    pub fn alternative_right_identity(&self, x: &F) -> Result<()> {
        let left = choose_first(x, &Suspension::ready(F::empty()))?;
        self.same("alternative right identity", &left, x)
    }

    /// `(x <|> y) <|> z == x <|> (y <|> z)`
    pub fn alternative_associativity(&self, x: &F, y: &F, z: &F) -> Result<()> {
        let left = choose_first(&choose_first(x, &ready(y))?, &ready(z))?;
        let right = choose_first(x, &Suspension::ready(choose_first(y, &ready(z))?))?;
        self.same("alternative associativity", &left, &right)
    }

    /// `f <*> (x <|> y) == (f <*> x) <|> (f <*> y)`
    pub fn alternative_distributivity(&self, f: &F, x: &F, y: &F) -> Result<()> {
        let left = f.ap(&Suspension::ready(choose_first(x, &ready(y))?))?;
        let right = choose_first(&f.ap(&ready(x))?, &Suspension::ready(f.ap(&ready(y))?))?;
        self.same("alternative distributivity", &left, &right)
    }

    /// `empty <*> x == empty`
    pub fn alternative_annihilation(&self, x: &F) -> Result<()> {
        let left = F::empty().ap(&ready(x))?;
        self.same("alternative annihilation", &left, &F::empty())
    }

    /// All five alternative laws.
    pub fn check_alternative_laws(&self, f: &F, x: &F, y: &F, z: &F) -> Result<()> {
        self.alternative_left_identity(x)?;
        self.alternative_right_identity(x)?;
        self.alternative_associativity(x, y, z)?;
        self.alternative_distributivity(f, x, y)?;
        self.alternative_annihilation(x)
    }
}

impl<F, O> LawChecker<F, O>
where
    F: Monad + Clone + 'static,
    O: PartialEq + fmt::Debug,
{
    /// `unit(a) >>= k == k(a)`
    pub fn monad_left_identity(&self, a: &Value, k: &Kleisli<F>) -> Result<()> {
        let left = F::unit(a.clone()).bind(k)?;
        let right = k(a.clone())?;
        self.same("monad left identity", &left, &right)
    }

    /// `m >>= unit == m`
    pub fn monad_right_identity(&self, m: &F) -> Result<()> {
        let unit: Kleisli<F> = Rc::new(|a: Value| -> Result<F> { Ok(F::unit(a)) });
        self.same("monad right identity", &m.bind(&unit)?, m)
    }

    /// `(m >>= f) >>= g == m >>= (|x| f(x) >>= g)`
    pub fn monad_associativity(&self, m: &F, f: &Kleisli<F>, g: &Kleisli<F>) -> Result<()> {
        let left = m.bind(f)?.bind(g)?;
        let (f_inner, g_inner) = (Rc::clone(f), Rc::clone(g));
        let nested: Kleisli<F> =
            Rc::new(move |x: Value| -> Result<F> { f_inner(x)?.bind(&g_inner) });
        let right = m.bind(&nested)?;
        self.same("monad associativity", &left, &right)
    }

    /// All three monad laws.
    pub fn check_monad_laws(
        &self,
        m: &F,
        a: &Value,
        f: &Kleisli<F>,
        g: &Kleisli<F>,
    ) -> Result<()> {
        self.monad_left_identity(a, f)?;
        self.monad_right_identity(m)?;
        self.monad_associativity(m, f, g)
    }
}

fn ready<F: Clone + 'static>(value: &F) -> Suspension<F> {
    Suspension::ready(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::Maybe;

    #[test]
    fn violations_render_both_sides() {
        let checker = LawChecker::<Maybe, Maybe>::structural();
        let err = checker
            .same("demo", &Maybe::just(1), &Maybe::Nothing)
            .unwrap_err();
        assert_eq!(err.to_string(), "demo law violated: Just(1) != Nothing");
    }
}
