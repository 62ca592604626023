use colored::*;
use matcher::match_result::Candidate;
use matcher::matcher_client::MatcherClient;
use matcher::{ChatRequest, GetThreadRequest};
use std::time::Instant;
use tokio::time::Duration;
use tonic::Request;

pub mod matcher {
    tonic::include_proto!("matcher");
}

pub struct TestCase {
    pub description: String,
    pub user_id: String,
    pub messages: Vec<String>,
}

fn with_identity<T>(message: T, user_id: &str) -> Result<Request<T>, Box<dyn std::error::Error>> {
    let mut request = Request::new(message);
    request.metadata_mut().insert("x-user-id", user_id.parse()?);
    Ok(request)
}

pub async fn run_test_case(
    host: &str,
    test_case: TestCase,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "=".repeat(50));
    println!("{}: {}", "Testing".blue(), test_case.description);
    println!("User: {}", test_case.user_id);
    println!("{}", "-".repeat(50));

    let mut client = MatcherClient::connect(host.to_string()).await?;
    let start_time = Instant::now();
    let mut thread_id: Option<String> = None;

    for message in &test_case.messages {
        println!("📤 CLIENT: {}", message);
        let request = with_identity(
            ChatRequest {
                thread_id: thread_id.clone(),
                message: message.clone(),
                top_k: 0,
            },
            &test_case.user_id,
        )?;
        let response = client.chat(request).await?.into_inner();
        thread_id = Some(response.thread_id.clone());

        println!("📥 SERVER: {}", response.response_text.yellow());
        for result in &response.results {
            let card = match &result.candidate {
                Some(Candidate::Roommate(r)) => format!("{} ({}, {})", r.name, r.occupation, r.location),
                Some(Candidate::Listing(l)) => format!("[listing] {} ({})", l.title, l.location),
                None => "unknown".to_string(),
            };
            println!(
                "  {} {:.2} {} {:?}",
                result.candidate_id.bold(),
                result.score,
                card,
                result.matched_signals
            );
        }

        // Add small delay to make output more readable
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    if let Some(thread_id) = thread_id {
        let summary = client
            .get_thread(with_identity(GetThreadRequest { thread_id }, &test_case.user_id)?)
            .await?
            .into_inner();
        println!(
            "\n{} {} turns, {} shown, preferences {:?}",
            "Thread summary:".green(),
            summary.turn_count,
            summary.shown_candidate_ids.len(),
            summary.accumulated_preferences
        );
    }

    let elapsed = start_time.elapsed();
    println!("\n{}", format!("Test completed in {:?}", elapsed).green());
    Ok(())
}
