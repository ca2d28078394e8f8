use seasontology::{Season, Seasontology, SeasontologyError, Variable};
use std::env;

#[tokio::main]
async fn main() -> Result<(), SeasontologyError> {
    // RUST_LOG=info shows cache hits and downloads
    env_logger::init();

    let mut args = env::args().skip(1);
    let one = args.next().unwrap_or_else(|| "KCMI".to_string());
    let two = args.next().unwrap_or_else(|| "KMRY".to_string());
    let variable = match args.next() {
        Some(name) => name.parse::<Variable>()?,
        None => Variable::MaxTempF,
    };

    let client = Seasontology::new().await?;
    let snapshot = client.daily(&one).await?;
    println!("{}", snapshot.frame.tail(Some(5)));

    let view = client.compare(&one, &two, variable).await?;
    println!(
        "{} (display range {} to {})",
        view.variable, view.range.min, view.range.max
    );
    for panel in &view.panels {
        println!("{}: {} days", panel.station, panel.points.len());
        for season in Season::ALL {
            match panel.distribution(season).and_then(|d| d.summary) {
                Some(s) => println!(
                    "  {:<13} mean {:>7.2}  median {:>7.2}  min {:>7.2}  max {:>7.2}",
                    season.label(),
                    s.mean,
                    s.median,
                    s.min,
                    s.max
                ),
                None => println!("  {:<13} no data", season.label()),
            }
        }
    }

    Ok(())
}
