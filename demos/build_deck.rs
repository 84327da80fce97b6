//! Build a small deck and write its parts to a ZIP archive.
//!
//! # Usage
//!
//! ```sh
//! RUST_LOG=warn cargo run --example build_deck -- -o deck-parts.zip
//! ```
//!
//! List the built-in layouts and their placeholder names:
//! ```sh
//! cargo run --example build_deck -- --list-layouts
//! ```

use clap::Parser;
use slidekit::{
    AddSlideOptions, ContentSpec, Geometry, PlaceholderDecl, Presentation, PresentationOptions,
    ShapeKind, SlideMasterProps, SlideNumberProps, TableData, ZipPackage,
};
use std::fs::File;
use std::path::PathBuf;

/// Compose a sample presentation with slidekit
#[derive(Parser, Debug)]
#[command(name = "build_deck", version)]
struct Args {
    /// Output ZIP file
    #[arg(short, long, value_name = "OUTPUT", default_value = "deck-parts.zip")]
    output: PathBuf,

    /// Presentation size preset
    #[arg(long, default_value = "LAYOUT_WIDE")]
    layout_size: String,

    /// Include layouts tagged with this division
    #[arg(long)]
    division: Option<String>,

    /// Print the layout catalog and exit
    #[arg(long)]
    list_layouts: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut pres = Presentation::with_options(PresentationOptions {
        layout_size: Some(args.layout_size),
        division: args.division,
        registry: None,
    })?;

    if args.list_layouts {
        for (i, layout) in pres.list_layouts().iter().enumerate() {
            if layout.is_spacer() {
                continue;
            }
            let names: Vec<_> = layout.def().labels().iter().map(|(name, _)| name).collect();
            println!("{:>3}  {:<48} {:?}", i + 1, layout.name(), names);
        }
        return Ok(());
    }

    pres.define_slide_master(SlideMasterProps {
        title: "Closing".into(),
        background: Some("0B1F3A".into()),
        objects: vec![
            ContentSpec::shape(ShapeKind::Rectangle, Some("F2A900")).at_inches(0.0, 7.2, 13.333, 0.3),
        ],
        placeholders: vec![
            PlaceholderDecl::new("message", "title", None)
                .at(Geometry::from_inches(1.0, 2.5, 11.333, 1.5)),
        ],
        slide_number: None,
    })?;
    pres.set_slide_number(SlideNumberProps::default());

    pres.add_section("Overview", None);
    {
        let mut slide = pres.add_slide(AddSlideOptions::layout("Two Content").in_section("Overview"));
        slide.add_text("Where we stand", "headline")?;
        slide.add_text("Revenue up 12%\nMargin stable", "leftContent")?;
        slide.add_text("Two new regions\nHiring on plan", "rightContent")?;
        slide.add_text("Source: internal reporting", "source")?;
    }
    {
        let mut slide = pres.add_slide(AddSlideOptions::layout("Title Only"));
        slide.add_text("By region", "headline")?;
        slide.add_table(
            TableData::new(vec![
                vec!["Region".into(), "Q1".into(), "Q2".into()],
                vec!["North".into(), "4.1".into(), "4.6".into()],
                vec!["South".into(), "3.2".into(), "3.5".into()],
            ]),
            Geometry::from_inches(1.0, 1.8, 11.0, 3.0),
        )?;
    }
    pres.add_slide(AddSlideOptions::layout("Closing"))
        .add_text("Thank you", "message")?;

    let mut zip = ZipPackage::new(File::create(&args.output)?);
    pres.export(&mut zip)?;
    zip.finish()?;
    println!(
        "wrote {} slide(s) to {}",
        pres.slide_count(),
        args.output.display()
    );
    Ok(())
}
