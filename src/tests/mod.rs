#[cfg(test)]
mod tests {
    use crate::api::{CandidateSummary, ChatRequest, ChatResponse, Identity};
    use crate::config::Config;
    use crate::constants::CONFIG_PATH;
    use crate::matcher_service::MatchingEngine;
    use anyhow::Result as AnyhowResult;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    async fn setup() -> AnyhowResult<MatchingEngine> {
        let config = Config::load_from_yaml(CONFIG_PATH)?;
        Ok(MatchingEngine::new(Arc::new(config)).await)
    }

    async fn chat(
        engine: &MatchingEngine,
        thread_id: Option<&str>,
        message: &str,
    ) -> AnyhowResult<ChatResponse> {
        let request = ChatRequest {
            thread_id: thread_id.map(str::to_string),
            message: message.to_string(),
            top_k: None,
        };
        Ok(engine.handle_chat(&Identity::new("tester"), request).await?)
    }

    fn ids(response: &ChatResponse) -> Vec<&str> {
        response
            .results
            .iter()
            .map(|r| r.candidate_id.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_sample_population_rankings() -> AnyhowResult<()> {
        let engine = setup().await?;

        let test_cases = vec![
            ("I want someone clean and quiet", vec!["3", "8", "9", "1", "2"]),
            ("Hello there", vec!["1", "2", "3"]),
            ("Something quiet under 1000", vec!["9", "L1", "4", "7", "L2"]),
            ("A quiet place in Lekki", vec!["L1"]),
        ];

        for (message, expected) in test_cases {
            let response = chat(&engine, None, message).await?;
            assert_eq!(ids(&response), expected, "Unexpected ranking for '{}'", message);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_thread_pages_through_population() -> AnyhowResult<()> {
        let engine = setup().await?;
        let message = "I want someone clean and quiet";

        let first = chat(&engine, None, message).await?;
        let thread_id = first.thread_id.clone();
        assert!(first.response_text.contains("preference for clean, quiet"));
        assert!(first.results[..3].iter().all(|r| r.score == 1.0));

        let second = chat(&engine, Some(&thread_id), message).await?;
        assert_eq!(ids(&second), vec!["5", "6", "7", "L1", "4"]);

        let third = chat(&engine, Some(&thread_id), message).await?;
        assert_eq!(ids(&third), vec!["L2"]);

        let exhausted = chat(&engine, Some(&thread_id), message).await?;
        assert!(exhausted.results.is_empty());

        let summary = engine.thread_summary(&Identity::new("tester"), &thread_id)?;
        assert_eq!(summary.turn_count, 8);
        assert_eq!(summary.shown_candidate_ids.len(), 11);

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_results_carry_listing_cards() -> AnyhowResult<()> {
        let engine = setup().await?;
        let response = chat(&engine, None, "A quiet place in Lekki").await?;

        match &response.results[0].candidate {
            Some(CandidateSummary::Listing {
                title,
                location,
                price,
                ..
            }) => {
                assert_eq!(title, "Sunny room in a shared Victorian");
                assert_eq!(location, "Lekki, Lagos");
                assert_eq!(*price, Some(350.0));
            }
            other => panic!("Expected a listing card, got {:?}", other),
        }
        assert_eq!(response.results[0].matched_signals, vec!["quiet"]);

        Ok(())
    }
}
