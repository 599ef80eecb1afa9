use clap::Parser;

use vtemplate::cli::{Cli, run};
use vtemplate::config::data_dir;
use vtemplate::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(&data_dir());

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let mut stdout = std::io::stdout().lock();
            run(cli, &mut stdout).await
        })
}
