//! Load generator for a running booking API.
//!
//! The server throttles each client IP, so start it with a large
//! `RATE_LIMIT_MAX_REQUESTS` before benchmarking, e.g.
//! `RATE_LIMIT_MAX_REQUESTS=1000000 cargo run --release`.

use chrono::{Duration as ChronoDuration, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::error::Error;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

type BenchResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const STAGE_SECS: u64 = 15;
const RPS_STAGES: [u32; 4] = [10, 50, 200, 1000];

struct Target {
    name: &'static str,
    method: Method,
    url: String,
    body: Option<Value>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "❌ Benchmark aborted:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> BenchResult<()> {
    let base_url = std::env::var("BENCH_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    println!("{}", "🚀 Starting booking API benchmark".bold().green());
    println!("Target URL: {}", base_url);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()?;

    if client.get(format!("{}/api/health", base_url)).send().await.is_err() {
        return Err(format!("server is not reachable at {}", base_url).into());
    }

    println!("\n{}", "⚙️  Seeding a booking...".yellow());
    let reference = seed_booking(&client, &base_url).await?;
    println!("{} {}", "✅ Seeded booking".green(), reference);

    let targets = vec![
        Target {
            name: "Health Check",
            method: Method::GET,
            url: format!("{}/api/health", base_url),
            body: None,
        },
        Target {
            name: "Lookup by Reference",
            method: Method::GET,
            url: format!("{}/api/bookings/search/reference?reference={}", base_url, reference),
            body: None,
        },
        Target {
            name: "List Bookings (latest first)",
            method: Method::GET,
            url: format!("{}/api/bookings?sortBy=latest", base_url),
            body: None,
        },
        Target {
            name: "Create Booking (write path)",
            method: Method::POST,
            url: format!("{}/api/bookings", base_url),
            body: Some(booking_payload()),
        },
    ];

    for target in &targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("{} {}", target.method, target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for rps in RPS_STAGES {
            run_stage(&client, target, rps).await?;
        }
    }

    Ok(())
}

fn booking_payload() -> Value {
    let check_in = Utc::now().date_naive() + ChronoDuration::days(30);
    json!({
        "roomType": "Deluxe Room",
        "name": "Benchmark Guest",
        "phone": "+923001234567",
        "email": "bench@example.com",
        "checkIn": check_in.to_string(),
        "checkOut": (check_in + ChronoDuration::days(2)).to_string(),
        "guests": 2
    })
}

async fn seed_booking(client: &Client, base_url: &str) -> BenchResult<String> {
    let res = client
        .post(format!("{}/api/bookings", base_url))
        .json(&booking_payload())
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(format!("seeding failed with {}: {}", status, text).into());
    }

    let body: Value = res.json().await?;
    body["data"]["bookingReference"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "response carried no bookingReference".into())
}

async fn run_stage(client: &Client, target: &Target, rps: u32) -> BenchResult<()> {
    let per_second = NonZeroU32::new(rps).ok_or("stage rate must be positive")?;
    let limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

    let (tx, mut rx) = mpsc::channel(50_000);
    let started = Instant::now();
    let duration = Duration::from_secs(STAGE_SECS);

    while started.elapsed() < duration {
        if limiter.check().is_err() {
            tokio::task::yield_now().await;
            continue;
        }

        let mut request = client.request(target.method.clone(), &target.url);
        if let Some(body) = &target.body {
            request = request.json(body);
        }
        let tx = tx.clone();

        tokio::spawn(async move {
            let sent = Instant::now();
            let success = matches!(request.send().await, Ok(r) if r.status().is_success());
            let _ = tx.send((sent.elapsed(), success)).await;
        });
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3)?;
    let mut successes = 0u64;
    let mut total = 0u64;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success {
            successes += 1;
        }
        histogram.record(latency.as_micros() as u64)?;
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { successes as f64 / total as f64 * 100.0 } else { 0.0 };

    let rate = format!("{:.1}%", success_rate);
    let rate = if success_rate < 99.0 { rate.red() } else { rate.normal() };
    println!("{:<10} | {:<15.2} | {:<15.2} | {:<15}", rps, mean_ms, p99_ms, rate);

    if success_rate < 50.0 && total > 0 {
        println!("{}", "   hint: 429s usually mean RATE_LIMIT_MAX_REQUESTS is too low".yellow());
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    Ok(())
}
