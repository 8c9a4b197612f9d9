use clap::{Arg, Command};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use site_client::api::ApiClient;
use site_client::cache::JsonCache;
use site_client::config::ClientConfig;
use site_client::emergency::{EmergencyOverlay, LogSpeaker};
use site_client::parking_board::{ParkingBoard, TapOutcome};
use site_client::realtime::RealtimeClient;
use site_client::ClientError;
use site_core::parking::SpotView;
use site_events::{tables, TableFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_client=info,site_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Command::new("site-console")
        .about("Resident and gate console for the site management API")
        .subcommand_required(true)
        .subcommand(Command::new("watch").about("Show the parking board and follow live changes"))
        .subcommand(
            Command::new("tap")
                .about("Claim a free parking spot, or release your own")
                .arg(Arg::new("spot").required(true).help("Location code, e.g. A-12")),
        )
        .subcommand(
            Command::new("gate")
                .about("Resolve a guest token at the gate")
                .arg(Arg::new("token").required(true).help("Scanned or typed token")),
        )
        .subcommand(Command::new("alerts").about("List active emergency alerts"));
    let matches = cli.get_matches();

    let config = ClientConfig::from_env();
    let result = match matches.subcommand() {
        Some(("watch", _)) => watch(&config).await,
        Some(("tap", args)) => {
            let code = args.get_one::<String>("spot").cloned().unwrap_or_default();
            tap(&config, &code).await
        }
        Some(("gate", args)) => {
            let token = args.get_one::<String>("token").cloned().unwrap_or_default();
            gate(&config, &token).await
        }
        Some(("alerts", _)) => alerts(&config).await,
        _ => Ok(()),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "site-console failed");
        std::process::exit(1);
    }
}

async fn logged_in(config: &ClientConfig) -> Result<(ApiClient, i64), ClientError> {
    let (Some(email), Some(password)) = (&config.email, &config.password) else {
        return Err(ClientError::NotLoggedIn);
    };
    let mut api = ApiClient::new(config.api_url.clone());
    let profile = api.login(email, password).await?;
    Ok((api, profile.id))
}

async fn gate(config: &ClientConfig, token: &str) -> Result<(), ClientError> {
    let (api, _) = logged_in(config).await?;
    let resolution = api.resolve_token(token).await?;
    match resolution.guest {
        Some(guest) => println!(
            "{:?}: {} ({}) visiting {}",
            resolution.outcome,
            guest.full_name,
            guest.plate_number.as_deref().unwrap_or("no plate"),
            guest.visit_date
        ),
        None => println!("{:?}: no pass with this token", resolution.outcome),
    }
    Ok(())
}

async fn tap(config: &ClientConfig, code: &str) -> Result<(), ClientError> {
    let (api, user_id) = logged_in(config).await?;
    let cache = JsonCache::new(config.cache_dir.clone());

    let mut board = ParkingBoard::new(user_id);
    board.refresh(&api, &cache).await?;
    let Some(id) = board
        .spots()
        .iter()
        .find(|spot| spot.location_code.eq_ignore_ascii_case(code.trim()))
        .map(|spot| spot.id)
    else {
        println!("No parking spot {code}");
        return Ok(());
    };

    match board.tap_spot(id, &api).await? {
        TapOutcome::Claimed(spot) => println!("Parked at {}", spot.location_code),
        TapOutcome::Released(spot) => println!("Released {}", spot.location_code),
        TapOutcome::Rejected(_) => println!("{code} is occupied by another resident"),
        TapOutcome::UnknownSpot => println!("No parking spot {code}"),
    }
    Ok(())
}

async fn alerts(config: &ClientConfig) -> Result<(), ClientError> {
    let (api, _) = logged_in(config).await?;
    for alert in api.active_alerts().await? {
        println!("[{}] {}", alert.alert_type, alert.message);
    }
    Ok(())
}

fn print_board(board: &ParkingBoard) {
    let summary = board.summary();
    println!(
        "free {} / occupied {} / mine {}",
        summary.free, summary.occupied, summary.mine
    );
    for spot in board.spots() {
        let mark = match board.view(spot) {
            SpotView::Free => " ",
            SpotView::Occupied => "x",
            SpotView::Mine => "*",
        };
        println!("[{mark}] {}", spot.location_code);
    }
}

async fn watch(config: &ClientConfig) -> Result<(), ClientError> {
    let (api, user_id) = logged_in(config).await?;
    let cache = JsonCache::new(config.cache_dir.clone());

    let mut board = ParkingBoard::new(user_id);
    if board.load_cached(&cache).await {
        print_board(&board);
    }
    if board.refresh(&api, &cache).await.is_ok() {
        print_board(&board);
    }

    let token = api.access_token().ok_or(ClientError::NotLoggedIn)?;
    let realtime = RealtimeClient::new(config.ws_url.clone(), token);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let parking_tx = tx.clone();
    let _parking = realtime.subscribe(TableFilter::table(tables::PARKING_SPOTS), move |event| {
        let _ = parking_tx.send(event);
    });
    let _alerts = realtime.subscribe(TableFilter::table(tables::EMERGENCY_ALERTS), move |event| {
        let _ = tx.send(event);
    });

    let mut overlay = EmergencyOverlay::new(LogSpeaker);
    match api.active_alerts().await {
        Ok(active) => {
            for alert in active {
                overlay.show(alert);
            }
        }
        Err(e) => tracing::warn!(error = %e, "Could not load active alerts"),
    }

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                if board.apply_change(&event) {
                    print_board(&board);
                }
                overlay.handle_event(&event);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping");
                break;
            }
        }
    }
    Ok(())
}
