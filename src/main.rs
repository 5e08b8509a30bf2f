use tasklist::commands::Cli;
use tasklist::libs::messages::macros::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();
    Cli::menu()
}
