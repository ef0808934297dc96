#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use caddie_strategy::course::{
    load_polygons, CaddieConfig, CourseSession, DEFAULT_COURSE_PATH, DEFAULT_POLYGONS_PATH,
};
use caddie_strategy::detect::analysis::compose::CompositeDescriber;
use caddie_strategy::detect::analysis::strategy::{
    format_strategy_response, response_format, SYSTEM_INSTRUCTIONS,
};
use log::{debug, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let course_path = args.next().unwrap_or_else(|| DEFAULT_COURSE_PATH.to_string());
    let polygons_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_POLYGONS_PATH.to_string());
    let reply_path = args.next();

    let config = CaddieConfig::load(&course_path)?;
    let polygons = load_polygons(&polygons_path)?;

    let session = CourseSession::with_data(config.course);
    let analysis = session.analyze(&polygons)?;
    println!("{}", analysis);

    for mark in analysis.overlay_marks() {
        debug!("overlay: {:?}", mark);
    }
    if !analysis.rejected_polygons.is_empty() {
        warn!(
            "{} segmentation polygons were unusable",
            analysis.rejected_polygons.len()
        );
    }

    let prompt = CompositeDescriber::new()
        .describe(&analysis, &config.setup)
        .await;
    debug!(
        "planner system instructions: {} chars, response format: {}",
        SYSTEM_INSTRUCTIONS.len(),
        response_format()
    );
    println!("{}", prompt);

    // A saved planner reply can be passed as a third argument for display
    if let Some(reply_path) = reply_path {
        let reply = std::fs::read_to_string(&reply_path)?;
        println!("{}", format_strategy_response(&reply)?);
    }

    Ok(())
}
