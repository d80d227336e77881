//! Dash Runner entry point
//!
//! The browser build is driven by the page through `platform::web::WebRunner`.
//! Natively this runs a headless autopilot session on each tier and logs the results.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dash_runner::sim::{Difficulty, Viewport};
    use dash_runner::{FrameDriver, HighScores, Settings};

    env_logger::init();
    log::info!("Dash Runner (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let tiers = match std::env::args().nth(1) {
        Some(name) => vec![Difficulty::parse_or_default(&name)],
        None => Difficulty::ALL.to_vec(),
    };
    let ticks: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(6000);

    let settings = Settings::default();
    let mut high_scores = HighScores::new();

    for difficulty in tiers {
        let mut driver = FrameDriver::new(42, Viewport::default(), difficulty);
        driver.set_autopilot(true);

        let report = driver.run_session(ticks, 100);
        for run in &report.runs {
            high_scores.add_score(run.score, difficulty, run.attempts, 0.0);
        }

        let vertices = dash_runner::renderer::build_scene(&driver.state, &settings);
        println!(
            "{:<6} ticks {:>6}  score {:>4}  attempts {:>3}  best {:>4}  vertices {}",
            difficulty.as_str(),
            report.ticks,
            driver.state.score,
            driver.state.attempts,
            high_scores
                .best_for(difficulty)
                .unwrap_or(0)
                .max(driver.state.score),
            vertices.len()
        );
        if !report.runs.is_empty() {
            let scores: Vec<u64> = report.runs.iter().map(|r| r.score).collect();
            log::info!("{} finished runs: {:?}", difficulty.as_str(), scores);
        }
    }

    if let Some(top) = high_scores.top_score() {
        println!("Top finished run: {}", top);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
