use std::path::Path;

use color_eyre::eyre::{Result, bail};
use splitting::backend::ffmpeg::FfmpegBackend;
use splitting::{FailurePolicy, MediaBackend, NameTemplate, Runner, Timecode, Timeline, plan_clips};
use tracing::info;

/// Skeleton timestamp file written by `clip_cli init`
pub const EXAMPLE_TIMELINE: &str = "\
# Ordered map of start time -> clip label.
# Each clip ends where the next one starts; the last clip runs to the
# end of the video.
\"00:00:00\": Intro
\"00:05:00\": Main
\"00:10:00\": Outro
";

/// Cut the source into clips according to the timestamp file
pub fn split(
    input: &Path,
    timestamps: &Path,
    output_dir: &Path,
    template: &str,
    on_error: FailurePolicy,
) -> Result<()> {
    let template: NameTemplate = template.parse()?;
    let timeline = Timeline::from_yaml_file(timestamps)?;
    info!(
        "loaded {} timestamp entries from {}",
        timeline.len(),
        timestamps.display()
    );

    let runner = Runner::new(FfmpegBackend::new()?).with_policy(on_error);
    let summary = runner.run(input, &timeline, output_dir, &template)?;

    info!(
        "created {} clips in {}",
        summary.created,
        output_dir.display()
    );
    Ok(())
}

/// Probe and plan, print the plans, cut nothing
pub fn plan(input: &Path, timestamps: &Path, template: &str, json: bool) -> Result<()> {
    let template: NameTemplate = template.parse()?;
    let timeline = Timeline::from_yaml_file(timestamps)?;

    let backend = FfmpegBackend::new()?;
    let duration = backend.probe_duration(input)?;
    let plans = plan_clips(
        timeline.entries(),
        Timecode::from_secs_f64(duration),
        &template,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    for plan in &plans {
        println!(
            "{:>3}  {} -> {}  {}",
            plan.index, plan.start, plan.end, plan.output_name
        );
    }
    println!(
        "{} clips over {}",
        plans.len(),
        Timecode::from_secs_f64(duration)
    );
    Ok(())
}

/// Print the probed total duration of a video
pub fn probe(input: &Path) -> Result<()> {
    let backend = FfmpegBackend::new()?;
    let duration = backend.probe_duration(input)?;
    println!("{duration:.3} s ({})", Timecode::from_secs_f64(duration));
    Ok(())
}

/// Write an example timestamp file to start from
pub fn init(output: &Path) -> Result<()> {
    if output.exists() {
        bail!("refusing to overwrite {}", output.display());
    }
    std::fs::write(output, EXAMPLE_TIMELINE)?;
    info!("wrote example timestamp file to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_timeline_parses_in_order() {
        let timeline = Timeline::from_yaml(EXAMPLE_TIMELINE).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.entries()[0].label, "Intro");
        assert_eq!(timeline.entries()[2].start.as_secs_f64(), 600.0);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let path = std::env::temp_dir().join("clip-cli-init-existing.yml");
        std::fs::write(&path, "existing").unwrap();
        assert!(init(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn init_writes_a_parseable_timeline() {
        let path = std::env::temp_dir().join("clip-cli-init-fresh.yml");
        std::fs::remove_file(&path).ok();
        init(&path).unwrap();
        assert!(Timeline::from_yaml_file(&path).is_ok());
        std::fs::remove_file(&path).ok();
    }
}
