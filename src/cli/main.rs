use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::json;
use std::error::Error;

#[derive(Parser)]
#[command(name = "kfix-cli")]
#[command(about = "K-Fix knowledge base CLI", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "KFIX_ENDPOINT")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List failures
    Failures {
        /// Free-text query
        #[arg(short, long)]
        query: Option<String>,

        /// Comma-separated tag filter
        #[arg(short, long)]
        tags: Option<String>,

        /// Status filter (Open, "In Analysis", Resolved, Closed)
        #[arg(short, long)]
        status: Option<String>,

        /// Priority filter (Critical, High, Medium, Low)
        #[arg(short = 'P', long)]
        priority: Option<String>,

        /// Sort key (date-desc, date-asc, priority, status)
        #[arg(short = 'S', long, default_value = "date-desc")]
        sort: String,

        #[arg(short, long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "6")]
        per_page: u32,
    },

    /// Get failure details
    Failure {
        #[arg(value_name = "FAILURE_ID")]
        id: u32,

        /// Also list linked solutions
        #[arg(short, long)]
        solutions: bool,
    },

    /// List solutions
    Solutions {
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long)]
        tags: Option<String>,

        /// Effectiveness band (high, medium, low)
        #[arg(short, long)]
        effectiveness: Option<String>,

        /// Sort key (effectiveness, uses, likes, date-desc, date-asc)
        #[arg(short = 'S', long, default_value = "effectiveness")]
        sort: String,

        #[arg(short, long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "6")]
        per_page: u32,
    },

    /// Get solution details
    Solution {
        #[arg(value_name = "SOLUTION_ID")]
        id: u32,
    },

    /// Search failures and solutions together
    Search {
        #[arg(value_name = "QUERY")]
        query: String,

        /// Restrict results (all, failures, solutions)
        #[arg(short, long, default_value = "all")]
        kind: String,
    },

    /// Show dashboard overview
    Overview,

    /// Show report aggregates
    Reports,

    /// Sign in and print the session cookies
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Failures {
            query,
            tags,
            status,
            priority,
            sort,
            page,
            per_page,
        } => {
            let mut url = format!(
                "{}/v1/failures?sort={}&page={}&per_page={}",
                cli.endpoint, sort, page, per_page
            );
            append_param(&mut url, "q", query.as_deref());
            append_param(&mut url, "tags", tags.as_deref());
            append_param(&mut url, "status", status.as_deref());
            append_param(&mut url, "priority", priority.as_deref());

            let response = client.get(&url).send().await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Failure { id, solutions } => {
            let response = client
                .get(format!("{}/v1/failures/{}", cli.endpoint, id))
                .send()
                .await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);

            if solutions {
                let response = client
                    .get(format!("{}/v1/failures/{}/solutions", cli.endpoint, id))
                    .send()
                    .await?;
                let body: serde_json::Value = response.json().await?;
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        }

        Commands::Solutions {
            query,
            tags,
            effectiveness,
            sort,
            page,
            per_page,
        } => {
            let mut url = format!(
                "{}/v1/solutions?sort={}&page={}&per_page={}",
                cli.endpoint, sort, page, per_page
            );
            append_param(&mut url, "q", query.as_deref());
            append_param(&mut url, "tags", tags.as_deref());
            append_param(&mut url, "effectiveness", effectiveness.as_deref());

            let response = client.get(&url).send().await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Solution { id } => {
            let response = client
                .get(format!("{}/v1/solutions/{}", cli.endpoint, id))
                .send()
                .await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Search { query, kind } => {
            let mut url = format!("{}/v1/search?kind={}", cli.endpoint, kind);
            append_param(&mut url, "q", Some(query.as_str()));

            let response = client.get(&url).send().await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Overview => {
            let response = client
                .get(format!("{}/v1/overview", cli.endpoint))
                .send()
                .await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Reports => {
            let response = client
                .get(format!("{}/v1/reports", cli.endpoint))
                .send()
                .await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Login { email, password } => {
            let response = client
                .post(format!("{}/v1/auth/login", cli.endpoint))
                .json(&json!({
                    "email": email,
                    "password": password,
                }))
                .send()
                .await?;

            for cookie in response.headers().get_all(reqwest::header::SET_COOKIE) {
                println!("{}", cookie.to_str().unwrap_or("<opaque cookie>"));
            }
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", cli.endpoint))
                .send()
                .await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

/// Append a query parameter when a value is present.
///
/// Values are percent-encoded just enough for the characters these filters
/// actually carry (spaces in status labels and free-text queries).
fn append_param(url: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&value.replace(' ', "%20"));
        }
    }
}
