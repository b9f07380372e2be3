use anyhow::Result;
use streamta_cli::app;

fn main() -> Result<()> {
    app::run()
}
