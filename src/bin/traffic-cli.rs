use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "traffic-cli")]
#[command(about = "Drive requests at the observability demo services", long_about = None)]
struct Cli {
    /// Base URL; a bare host:port gets an http:// prefix.
    #[arg(short, long, env = "TARGET_ONE_SVC", default_value = "localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET / (either service)
    Root,
    /// Scrape the test app metrics
    Metrics,
    /// GET /items/{id} on the load app
    Item {
        id: String,
        #[arg(long)]
        q: Option<String>,
    },
    /// Trigger the simulated I/O task
    Io,
    /// Trigger the simulated CPU task
    Cpu,
    /// Ask for a random status code
    RandomStatus,
    /// Fire many requests and print a status histogram
    Load {
        #[arg(short = 'n', long, default_value_t = 100)]
        count: usize,
        #[arg(short, long, default_value_t = 10)]
        concurrency: usize,
        #[arg(short, long, default_value = "/random_status")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let base = base_url(&cli.url);
    let client = reqwest::Client::new();

    let path = match cli.command {
        Commands::Root => "/".to_string(),
        Commands::Metrics => "/metrics".to_string(),
        Commands::Item { id, q } => match q {
            Some(q) => format!("/items/{id}?q={q}"),
            None => format!("/items/{id}"),
        },
        Commands::Io => "/io_task".to_string(),
        Commands::Cpu => "/cpu_task".to_string(),
        Commands::RandomStatus => "/random_status".to_string(),
        Commands::Load {
            count,
            concurrency,
            path,
        } => {
            return run_load(client, format!("{base}{path}"), count, concurrency).await;
        }
    };

    let res = client.get(format!("{base}{path}")).send().await?;
    print_response(res).await
}

fn base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    println!("HTTP {status}");

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}

async fn run_load(
    client: reqwest::Client,
    url: String,
    count: usize,
    concurrency: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let concurrency = concurrency.clamp(1, count.max(1));
    let next = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let start = Instant::now();

    let mut tasks = Vec::new();
    for _ in 0..concurrency {
        let client = client.clone();
        let url = url.clone();
        let next = next.clone();
        tasks.push(tokio::spawn(async move {
            let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
            let mut latencies = Vec::new();
            while next.fetch_add(1, std::sync::atomic::Ordering::Relaxed) < count {
                let req_start = Instant::now();
                let key = match client.get(&url).send().await {
                    Ok(res) => res.status().as_u16().to_string(),
                    Err(_) => "error".to_string(),
                };
                latencies.push(req_start.elapsed());
                *statuses.entry(key).or_default() += 1;
            }
            (statuses, latencies)
        }));
    }

    let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
    let mut latencies: Vec<Duration> = Vec::new();
    for task in tasks {
        let (task_statuses, task_latencies) = task.await?;
        for (status, n) in task_statuses {
            *statuses.entry(status).or_default() += n;
        }
        latencies.extend(task_latencies);
    }

    let duration = start.elapsed();
    latencies.sort();
    let percentile = |p: f64| {
        latencies
            .get(((latencies.len() as f64 * p) as usize).min(latencies.len().saturating_sub(1)))
            .copied()
            .unwrap_or_default()
    };

    println!("\n--- Load Results ---");
    println!("URL:            {url}");
    println!("Total Requests: {}", latencies.len());
    println!("Concurrency:    {concurrency}");
    println!("Total Duration: {duration:?}");
    println!(
        "Requests/sec:   {:.2}",
        latencies.len() as f64 / duration.as_secs_f64().max(f64::EPSILON)
    );
    println!("P50 Latency:    {:?}", percentile(0.50));
    println!("P95 Latency:    {:?}", percentile(0.95));
    println!("P99 Latency:    {:?}", percentile(0.99));
    for (status, n) in &statuses {
        println!("Status {status:>5}:   {n}");
    }
    println!("--------------------\n");
    Ok(())
}
