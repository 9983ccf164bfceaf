use clap::Args;
use taskmine_protocol::RunOverrides;

use taskmine_console::client::ApiClient;
use taskmine_console::console::SimulationConsole;
use taskmine_console::term::Terminal;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub overrides: RunOverrides,
}

/// One-shot run: fetch the published defaults, layer the flags the user
/// passed on top, show the effective form, run once.
pub async fn execute(api: &str, args: RunArgs) {
    let mut console = SimulationConsole::new(ApiClient::new(api), Terminal);

    console.load_defaults().await;
    let mut config = console.current_config().cloned().unwrap_or_default();
    args.overrides.apply(&mut config);
    console.apply_config(&config);

    console.show_form();
    // The form drops seed and verifier-count overrides, so submit the
    // merged config directly.
    console.run_config(config).await;
}
