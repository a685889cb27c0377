use anyhow::Result;
use clap::{Arg, Command};
use sample_lesson_viewer::{
    render_sample_lessons, MemoryCatalog, NullEmbedService, OEmbedClient, OptionsBuilder,
};
use sample_lesson_viewer::video::oembed::EmbedService;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("sample_lesson_viewer=info,warn")
        .init();

    let matches = Command::new("Sample Lesson Viewer")
        .version("0.1.0")
        .about("Render the sample-lessons block for a catalog fixture")
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .value_name("FILE")
                .help("TOML catalog fixture to render")
                .required(true),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .value_name("NUM")
                .help("Grid columns (clamped to 1-4)")
                .default_value("3"),
        )
        .arg(
            Arg::new("courses")
                .long("courses")
                .value_name("IDS")
                .help("Comma-separated course ids to include"),
        )
        .arg(
            Arg::new("hide-excerpt")
                .long("hide-excerpt")
                .help("Skip lesson excerpts")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("hide-thumbnail")
                .long("hide-thumbnail")
                .help("Skip lesson thumbnails")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("hide-video")
                .long("hide-video")
                .help("Skip video resolution entirely")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("hide-course")
                .long("hide-course")
                .help("Skip per-course section headers")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lazy-video")
                .long("lazy-video")
                .help("Render click-to-load video placeholders")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("oembed")
                .long("oembed")
                .help("Resolve unclassified URLs through oEmbed endpoints")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let catalog_path = PathBuf::from(matches.get_one::<String>("catalog").unwrap());
    let columns: u8 = matches.get_one::<String>("columns").unwrap().parse()?;

    info!("📚 Loading catalog fixture: {}", catalog_path.display());
    let fixture = std::fs::read_to_string(&catalog_path)?;
    let catalog = MemoryCatalog::from_toml_str(&fixture)?;

    let mut builder = OptionsBuilder::new()
        .with_columns(columns)
        .show_excerpt(!matches.get_flag("hide-excerpt"))
        .show_thumbnail(!matches.get_flag("hide-thumbnail"))
        .show_video(!matches.get_flag("hide-video"))
        .show_course(!matches.get_flag("hide-course"))
        .lazy_video(matches.get_flag("lazy-video"));

    if let Some(courses) = matches.get_one::<String>("courses") {
        let ids: Vec<u64> = courses
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect();
        builder = builder.with_course_filter(ids);
    }
    let options = builder.build();

    let embeds: Box<dyn EmbedService> = if matches.get_flag("oembed") {
        Box::new(OEmbedClient::new())
    } else {
        Box::new(NullEmbedService)
    };

    let html = render_sample_lessons(&catalog, &options, embeds.as_ref());
    println!("{}", html);

    Ok(())
}
