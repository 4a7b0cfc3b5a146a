use std::io::Write;
use std::path::Path;

use dwmlgen::{
    build_document, get_config_info, load, render, setup_logger, Error, FormatRequest, Profile,
};
use dwmlgen_core::ensure_parent_exists;
use slog::info;
use time::OffsetDateTime;

fn main() -> Result<(), anyhow::Error> {
    let cli = get_config_info();
    let logger = setup_logger(&cli);

    let profile = cli.product()?;
    let units = cli.units()?;

    info!(logger, "DWML formatter starting...";
        "product" => profile.product_name(),
        "days" => cli.days());

    let points = load(cli.input.as_deref().map(Path::new), &logger)?;
    info!(logger, "input decoded"; "points" => points.len());

    let request = FormatRequest {
        profile,
        units,
        // Glance carries condition icons by definition.
        icons: cli.icons || profile == Profile::Glance,
        start: cli.begin(),
        end: cli.end(),
        num_days: cli.days(),
        include: cli.elements()?,
        exclude: cli.exclude()?,
        creation_epoch: cli
            .creation_date
            .unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp()),
    };

    let document = match build_document(&request, &points, &logger) {
        Ok(document) => document,
        // An empty prober result is not a failure; there is just nothing
        // to format.
        Err(Error::EmptyMatches) => {
            info!(logger, "prober returned no matches, no document produced");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let xml = render(&document);
    match cli.output.as_deref() {
        Some(path) => {
            ensure_parent_exists(path)?;
            std::fs::write(path, &xml)?;
            info!(logger, "document written"; "path" => path, "bytes" => xml.len());
        }
        None => {
            std::io::stdout().write_all(xml.as_bytes())?;
        }
    }
    Ok(())
}
