use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::info;

use tana::config::{resolve_server_url, AppConfig};
use tana::{ApiClient, App, Transport};

#[derive(Parser)]
#[command(about = "Terminal client for a personal book and manga library server")]
struct Cli {
    /// Base URL of the library server
    #[arg(short, long, env = "TANA_SERVER")]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    let cli = Cli::parse();
    let config = AppConfig::load();
    let server_url = resolve_server_url(cli.server, &config);
    info!("using server {}", server_url);

    let transport: Arc<dyn Transport> = Arc::new(ApiClient::new(server_url)?);
    let mut app = App::new(transport);

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut app).await;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    let mut normal_mode = true;

    loop {
        app.prerender().await;
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let handled = app.new_event(&mut normal_mode, key);
        if !handled && normal_mode && key.code == KeyCode::Char('q') {
            return Ok(());
        }
    }
}
