//! Round assembly: two describe-then-download pairs, then shuffle.

use tracing::{debug, info};

use fol_core::{FetchedImage, Round, RoundError, RoundStage};

use crate::fetcher::ImageFetcher;
use crate::provider::ImageProvider;

/// Builds rounds from a provider and a fetcher.
///
/// Both halves are fetched concurrently and both must succeed; the first
/// failure aborts the other and no partial round is returned.
#[derive(Debug, Clone)]
pub struct RoundBuilder<P, F> {
    provider: P,
    fetcher: F,
}

impl<P, F> RoundBuilder<P, F> {
    pub fn new(provider: P, fetcher: F) -> Self {
        Self { provider, fetcher }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P, F> RoundBuilder<P, F>
where
    P: ImageProvider + Sync,
    F: ImageFetcher + Sync,
{
    /// Fetch image A (shown once) and image B (shown three times), assemble
    /// `[A, B, B, B]`, and shuffle.
    pub async fn build_round(&self) -> Result<Round, RoundError> {
        let (unique, repeated) = tokio::try_join!(
            self.fetch_image(RoundStage::UniqueImage),
            self.fetch_image(RoundStage::RepeatedImage),
        )?;

        let round = Round::assemble(unique, repeated, &mut rand::thread_rng());
        info!(
            "Round assembled, singleton at slot {}",
            round.singleton_index().unwrap_or_default()
        );
        Ok(round)
    }

    async fn fetch_image(&self, stage: RoundStage) -> Result<FetchedImage, RoundError> {
        let descriptor = self
            .provider
            .fetch_random_image()
            .await
            .map_err(|e| RoundError::network(stage, e))?;

        let bytes = self
            .fetcher
            .fetch_bytes(&descriptor)
            .await
            .map_err(|e| RoundError::network(stage, e))?;

        debug!("Fetched {} ({} bytes)", stage, bytes.len());
        Ok(FetchedImage { descriptor, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_descriptor, StubFetcher, StubProvider};
    use fol_core::{NetworkError, REPEAT_COUNT, ROUND_SIZE, UNIQUE_IMAGE_ID};

    #[tokio::test]
    async fn test_build_round_shape() {
        let builder = RoundBuilder::new(StubProvider::new(), StubFetcher::new());

        for _ in 0..20 {
            let round = builder.build_round().await.unwrap();
            assert_eq!(round.len(), ROUND_SIZE);

            let mut counts: Vec<usize> = (0..ROUND_SIZE)
                .map(|i| round.multiplicity(i).unwrap())
                .collect();
            counts.sort_unstable();
            assert_eq!(counts, vec![1, REPEAT_COUNT, REPEAT_COUNT, REPEAT_COUNT]);
        }
    }

    #[tokio::test]
    async fn test_build_round_singleton_is_first_descriptor() {
        let provider = StubProvider::with_responses(vec![
            Ok(test_descriptor("first")),
            Ok(test_descriptor("second")),
        ]);
        let builder = RoundBuilder::new(provider, StubFetcher::new());

        let round = builder.build_round().await.unwrap();
        let singleton = round.get(round.singleton_index().unwrap()).unwrap();
        assert_eq!(singleton.id, UNIQUE_IMAGE_ID);
        assert!(singleton.descriptor.url.as_str().ends_with("first.jpg"));
        assert_eq!(builder.provider().calls(), 2);
    }

    #[tokio::test]
    async fn test_build_round_first_provider_failure() {
        let provider = StubProvider::with_responses(vec![
            Err(NetworkError::status(403, "https://api.example.com/photos/random")),
            Ok(test_descriptor("second")),
        ]);
        let builder = RoundBuilder::new(provider, StubFetcher::new());

        let err = builder.build_round().await.unwrap_err();
        assert_eq!(
            err,
            RoundError::network(
                RoundStage::UniqueImage,
                NetworkError::status(403, "https://api.example.com/photos/random")
            )
        );
    }

    #[tokio::test]
    async fn test_build_round_second_provider_failure() {
        let provider = StubProvider::with_responses(vec![
            Ok(test_descriptor("first")),
            Err(NetworkError::decode("missing urls")),
        ]);
        let builder = RoundBuilder::new(provider, StubFetcher::new());

        let err = builder.build_round().await.unwrap_err();
        assert!(matches!(
            err,
            RoundError::Network {
                stage: RoundStage::RepeatedImage,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_build_round_fetch_failure() {
        let provider = StubProvider::with_responses(vec![
            Ok(test_descriptor("first")),
            Ok(test_descriptor("broken")),
        ]);
        let fetcher = StubFetcher::new().fail_for(&test_descriptor("broken").url);
        let builder = RoundBuilder::new(provider, fetcher);

        let err = builder.build_round().await.unwrap_err();
        assert!(matches!(
            err.network_error(),
            NetworkError::EmptyBody { .. }
        ));
    }
}
