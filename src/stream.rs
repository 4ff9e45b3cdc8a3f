//! The chunked-stream driver: a two-phase transform interface and lazy
//! pipelines that feed it.
//!
//! A [`Transform`] sees its input one chunk at a time and is flushed exactly
//! once when the source is exhausted. [`pipeline`] drives a transform from
//! any iterator of chunks, yielding each step's output lazily;
//! [`try_pipeline`] does the same for fallible sources and abandons the
//! transform, finalizer unrun, as soon as the source fails.
//!
//! ```
//! use armor64::stream::pipeline;
//!
//! let decoded: Result<Vec<_>, _> = pipeline(["QU", "JD"], armor64::Decoder::new()).collect();
//! assert_eq!(decoded.unwrap().concat(), b"ABC");
//! ```

/// A stateful chunk-at-a-time transformation with an end-of-stream flush.
pub trait Transform {
    /// The output produced for each input chunk and by the finalizer.
    type Output;
    /// The error produced by a failed transformation step.
    type Error;

    /// Absorb one input chunk, producing whatever output it completed.
    fn on_chunk(&mut self, chunk: &[u8]) -> Result<Self::Output, Self::Error>;

    /// Consume the transform, flushing buffered state as final output.
    fn on_end(self) -> Result<Self::Output, Self::Error>
    where
        Self: Sized;
}

/// Drive `transform` over `source`, yielding one output per chunk and a
/// final flushed output after the last chunk.
///
/// The returned iterator is lazy: nothing is pulled from `source` until the
/// pipeline itself is polled, and dropping the pipeline early never runs
/// the finalizer. After a transform error the pipeline is exhausted and the
/// finalizer is not invoked.
pub fn pipeline<S, T>(source: S, transform: T) -> Pipeline<S::IntoIter, T>
where
    S: IntoIterator,
    S::Item: AsRef<[u8]>,
    T: Transform,
{
    Pipeline {
        source: source.into_iter(),
        transform: Some(transform),
    }
}

/// Iterator returned by [`pipeline`].
#[derive(Debug)]
pub struct Pipeline<S, T> {
    source: S,
    transform: Option<T>,
}

impl<S, T> Iterator for Pipeline<S, T>
where
    S: Iterator,
    S::Item: AsRef<[u8]>,
    T: Transform,
{
    type Item = Result<T::Output, T::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let transform = self.transform.as_mut()?;
        match self.source.next() {
            Some(chunk) => match transform.on_chunk(chunk.as_ref()) {
                Ok(output) => Some(Ok(output)),
                Err(err) => {
                    self.transform = None;
                    Some(Err(err))
                }
            },
            None => {
                let transform = self.transform.take()?;
                Some(transform.on_end())
            }
        }
    }
}

/// Drive `transform` over a source that can itself fail.
///
/// A source error is forwarded as-is and abandons the transform without
/// flushing it, so a stream that terminates abnormally never emits a
/// partial final chunk.
pub fn try_pipeline<S, T, C, E>(source: S, transform: T) -> TryPipeline<S::IntoIter, T>
where
    S: IntoIterator<Item = Result<C, E>>,
    C: AsRef<[u8]>,
    T: Transform,
    E: From<T::Error>,
{
    TryPipeline {
        source: source.into_iter(),
        transform: Some(transform),
    }
}

/// Iterator returned by [`try_pipeline`].
#[derive(Debug)]
pub struct TryPipeline<S, T> {
    source: S,
    transform: Option<T>,
}

impl<S, T, C, E> Iterator for TryPipeline<S, T>
where
    S: Iterator<Item = Result<C, E>>,
    C: AsRef<[u8]>,
    T: Transform,
    E: From<T::Error>,
{
    type Item = Result<T::Output, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let transform = self.transform.as_mut()?;
        match self.source.next() {
            Some(Ok(chunk)) => match transform.on_chunk(chunk.as_ref()) {
                Ok(output) => Some(Ok(output)),
                Err(err) => {
                    self.transform = None;
                    Some(Err(err.into()))
                }
            },
            Some(Err(err)) => {
                self.transform = None;
                Some(Err(err))
            }
            None => {
                let transform = self.transform.take()?;
                Some(transform.on_end().map_err(E::from))
            }
        }
    }
}
