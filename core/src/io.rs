use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::context::Context;
use crate::error::{Error, Result};

type Effect<T> = dyn Fn(Context) -> BoxFuture<'static, Result<T>> + Send + Sync;

/// A deferred computation producing a `T` or an [`Error`] when run against a [`Context`].
///
/// Nothing happens until [`Io::run`] is awaited. Every run is independent, so the same value may
/// be run any number of times.
pub struct Io<T> {
    effect: Arc<Effect<T>>,
}

impl<T> Clone for Io<T> {
    fn clone(&self) -> Self {
        Io { effect: self.effect.clone() }
    }
}

impl<T: Send + 'static> Io<T> {
    pub fn new<F, Fut>(effect: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Io { effect: Arc::new(move |ctx| effect(ctx).boxed()) }
    }

    pub fn pure(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Io::new(move |_| {
            let value = value.clone();
            async move { Ok(value) }
        })
    }

    /// Errors are not `Clone`, so a failing effect builds a fresh one per run.
    pub fn fail<F>(error: F) -> Self
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        Io::new(move |_| {
            let error = error();
            async move { Err(error) }
        })
    }

    pub async fn run(&self, ctx: &Context) -> Result<T> {
        (self.effect)(ctx.clone()).await
    }

    pub fn bind<U, F>(self, next: F) -> Io<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Io<U> + Send + Sync + 'static,
    {
        bind(self, next)
    }

    pub fn map<U, F>(self, f: F) -> Io<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let io = self;
        let f = Arc::new(f);
        Io::new(move |ctx| {
            let io = io.clone();
            let f = f.clone();
            async move { io.run(&ctx).await.map(|t| f(t)) }
        })
    }
}

/// Sequential composition: runs `io`, then the effect `next` builds from its value.
/// A failure of `io` is returned as is and `next` is never called.
pub fn bind<T, U, F>(io: Io<T>, next: F) -> Io<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> Io<U> + Send + Sync + 'static,
{
    let next = Arc::new(next);
    Io::new(move |ctx| {
        let io = io.clone();
        let next = next.clone();
        async move {
            let t = io.run(&ctx).await?;
            next(t).run(&ctx).await
        }
    })
}

/// Wraps a plain fallible function so it can be used as the continuation of [`bind`].
/// The resulting effects never look at the context.
pub fn lift<T, U, F>(pure: F) -> impl Fn(T) -> Io<U> + Clone + Send + Sync + 'static
where
    T: Clone + Send + Sync + 'static,
    U: Send + 'static,
    F: Fn(T) -> Result<U> + Send + Sync + 'static,
{
    let pure = Arc::new(pure);
    move |t: T| {
        let pure = pure.clone();
        Io::new(move |_| {
            let result = pure(t.clone());
            async move { result }
        })
    }
}

/// Runs every effect in order and collects their values. Stops at the first failure and returns
/// that error alone; later effects are not run.
pub fn all<T, I>(ios: I) -> Io<Vec<T>>
where
    T: Send + 'static,
    I: IntoIterator<Item = Io<T>>,
{
    let ios: Arc<[Io<T>]> = ios.into_iter().collect();
    Io::new(move |ctx| {
        let ios = ios.clone();
        async move {
            let mut ret = Vec::with_capacity(ios.len());
            for io in ios.iter() {
                ret.push(io.run(&ctx).await?);
            }
            Ok(ret)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn counted<T: Clone + Send + Sync + 'static>(counter: &Arc<AtomicUsize>, value: T) -> Io<T> {
        let counter = counter.clone();
        Io::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            let value = value.clone();
            async move { Ok(value) }
        })
    }

    fn missing(key: &'static str) -> Io<i32> {
        Io::fail(move || Error::MissingEnv(key.to_string()))
    }

    #[tokio::test]
    async fn bind_passes_the_value_on() {
        let io = bind(Io::pure(20), |n: i32| Io::pure(n + 1));
        assert_eq!(io.run(&Context::background()).await.unwrap(), 21);
    }

    #[tokio::test]
    async fn bind_failure_never_calls_next() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let io = bind(missing("FIRST"), move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            missing("SECOND")
        });
        let result = io.run(&Context::background()).await;
        assert!(matches!(result, Err(Error::MissingEnv(key)) if key == "FIRST"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_failure_surfaces_verbatim() {
        let io = bind(Io::pure(1), |_| missing("SECOND"));
        let result = io.run(&Context::background()).await;
        assert!(matches!(result, Err(Error::MissingEnv(key)) if key == "SECOND"));
    }

    #[tokio::test]
    async fn building_a_chain_runs_nothing() {
        let runs = Arc::new(AtomicUsize::new(0));
        let first = counted(&runs, 1);
        let second_runs = runs.clone();
        let chain = bind(first, move |n| counted(&second_runs, n * 2));
        let aggregate = all(vec![chain.clone(), chain.clone()]);
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        assert_eq!(chain.run(&Context::background()).await.unwrap(), 2);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(aggregate.run(&Context::background()).await.unwrap(), vec![2, 2]);
        assert_eq!(runs.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn lift_ignores_a_cancelled_context() {
        let parse = |s: String| s.parse::<i64>().map_err(|e| Error::Config(e.to_string()));
        let lifted = lift(parse);
        let ctx = Context::background();
        ctx.cancel();

        assert_eq!(lifted("42".to_string()).run(&ctx).await.unwrap(), parse("42".to_string()).unwrap());
        let direct = parse("x".to_string()).unwrap_err().to_string();
        let via_io = lifted("x".to_string()).run(&ctx).await.unwrap_err().to_string();
        assert_eq!(via_io, direct);
    }

    #[tokio::test]
    async fn lift_plugs_into_bind() {
        let io = bind(Io::pure("7".to_string()), lift(|s: String| Ok(s.len())));
        assert_eq!(io.run(&Context::background()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn all_collects_in_declared_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let step = |n: i32| {
            let order = order.clone();
            Io::new(move |_| {
                order.lock().unwrap().push(n);
                async move { Ok(n * 10) }
            })
        };
        let result = all(vec![step(1), step(2), step(3)]).run(&Context::background()).await.unwrap();
        assert_eq!(result, vec![10, 20, 30]);
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn all_stops_at_the_first_failure() {
        let first = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));
        let io = all(vec![counted(&first, 1), missing("SECOND"), counted(&third, 3)]);
        let result = io.run(&Context::background()).await;
        assert!(matches!(result, Err(Error::MissingEnv(key)) if key == "SECOND"));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn all_of_nothing_is_empty() {
        let io: Io<Vec<i32>> = all(Vec::new());
        assert!(io.run(&Context::background()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn map_transforms_success_only() {
        let ctx = Context::background();
        assert_eq!(Io::pure(3).map(|n| n * 3).run(&ctx).await.unwrap(), 9);
        assert!(missing("M").map(|n| n * 3).run(&ctx).await.is_err());
    }
}
