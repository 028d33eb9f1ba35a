use anyhow::Context;
use swipe_demo::{run_scripted_session, sample_listings, DemoShell, FrameSource};
use swipedeck_ui::{validate_viewport, StackConfig, SwipeConfig};
use swipedeck_ui_graphics::Size;

const DEFAULT_WIDTH: f32 = 390.0;
const DEFAULT_HEIGHT: f32 = 844.0;

fn env_dimension(name: &str, default: f32) -> anyhow::Result<f32> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f32>()
            .with_context(|| format!("{name}={raw:?} is not a number")),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {name}")),
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let viewport = Size::new(
        env_dimension("SWIPEDECK_WIDTH", DEFAULT_WIDTH)?,
        env_dimension("SWIPEDECK_HEIGHT", DEFAULT_HEIGHT)?,
    );
    validate_viewport(viewport)?;

    let swipe_config = SwipeConfig::default();
    let stack_config = StackConfig::default();
    swipe_config.validate()?;
    stack_config.validate()?;

    println!("=== SwipeDeck Demo ===");
    println!("Viewport {}x{}", viewport.width, viewport.height);
    println!(
        "Commit past {:.0}px or {:.0}px/s",
        swipe_config.swipe_threshold(viewport),
        swipe_config.velocity_threshold
    );
    println!();

    let mut shell = DemoShell::new(viewport, FrameSource::wall_clock(), sample_listings())
        .with_config(swipe_config, stack_config);
    let report = run_scripted_session(&mut shell);

    println!("{}", report.ledger);
    println!(
        "{} releases, {} ignored taps, {} cards left, {} frames",
        report.decisions.len(),
        report.ignored_taps,
        report.remaining,
        report.frames
    );
    Ok(())
}
