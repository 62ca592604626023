use colored::*;
use run_testcase::TestCase;

mod run_testcase;
use crate::run_testcase::run_test_case;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "http://localhost:50030".to_string());
    println!("{}", "Starting roommate matcher conversation tests...".blue());
    println!("Using server at {}\n", host);

    let test_cases = vec![
        TestCase {
            description: "Refining preferences over three turns".to_string(),
            user_id: "interactive-alice".to_string(),
            messages: vec![
                "Hi! I'm looking for a roommate".to_string(),
                "Ideally someone clean and quiet".to_string(),
                "Also a non-smoker, budget under 1500".to_string(),
            ],
        },
        TestCase {
            description: "Listings near a location".to_string(),
            user_id: "interactive-bob".to_string(),
            messages: vec![
                "A quiet room in Lagos".to_string(),
                "Something social for a student".to_string(),
            ],
        },
    ];

    for test_case in test_cases {
        run_test_case(&host, test_case).await?;
    }

    println!("\n{}", "All tests completed.".green());
    Ok(())
}
