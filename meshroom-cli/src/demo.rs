use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Input, Select};
use meshroom::model::{DeviceInfo, EmotionDelta, MediaKind};
use meshroom::session::{
    LoopbackMesh, MediaDevices, NoopAnalytics, Participant, ParticipantCommand, SessionConfig,
    TracingView, VirtualDevices, sink_for,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(clap::Args)]
pub struct DemoArgs {
    /// Name announced to the room.
    #[arg(long, env = "MESHROOM_NAME", default_value = "Guest")]
    name: String,

    #[arg(long, env = "MESHROOM_ROOM", default_value = "lobby")]
    room: String,

    /// Bot peers already in the room.
    #[arg(long, default_value_t = 2)]
    bots: usize,

    /// Seconds between bot emotion changes.
    #[arg(long, default_value_t = 5)]
    bot_interval: u64,

    /// Give up a join that never opens after this many seconds.
    #[arg(long)]
    join_timeout: Option<u64>,

    /// Endpoint receiving emotion samples as JSON.
    #[arg(long, env = "MESHROOM_ANALYTICS")]
    analytics: Option<String>,
}

const ACTIONS: [&str; 9] = [
    "→ closer",
    "← farther",
    "rename",
    "toggle audio",
    "toggle video",
    "switch camera",
    "leave",
    "rejoin",
    "quit",
];

struct Bot {
    commands: mpsc::Sender<ParticipantCommand>,
    run: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

pub async fn run(args: DemoArgs) -> Result<()> {
    let mesh = LoopbackMesh::new();

    let mut bots = Vec::with_capacity(args.bots);
    for i in 0..args.bots {
        bots.push(spawn_bot(&mesh, i, &args.room, args.bot_interval).await?);
    }
    info!("{} bot(s) waiting in {}", bots.len(), args.room);

    let mut config = SessionConfig::default().with_display_name(args.name.clone());
    config.analytics_endpoint = args.analytics.clone();
    if let Some(secs) = args.join_timeout {
        config = config.with_join_timeout(Duration::from_secs(secs));
    }

    let devices = Arc::new(VirtualDevices::default_rig());
    let (_, cameras) = DeviceInfo::split_by_kind(&devices.enumerate().await?);
    let analytics = sink_for(&config);

    let mut participant = Participant::new(
        config,
        Arc::new(mesh.clone()),
        devices,
        Arc::new(crate::console_view::ConsoleView),
        analytics,
    );
    participant
        .start()
        .await
        .context("Failed to open the local capture")?;

    let (tx, rx) = mpsc::channel(32);
    let user = tokio::spawn(participant.run(rx));
    tx.send(ParticipantCommand::Join {
        room_id: args.room.clone(),
    })
    .await?;

    println!("{}", joining_banner(&args.room).green().bold());

    let room = args.room.clone();
    tokio::task::spawn_blocking(move || prompt_loop(tx, room, cameras))
        .await
        .context("Prompt thread panicked")??;

    user.await?;
    for bot in bots {
        bot.ticker.abort();
        let _ = bot.ticker.await;
        drop(bot.commands);
        bot.run.await?;
    }

    println!("{}", "✨ Bye".green().bold());
    Ok(())
}

async fn spawn_bot(mesh: &LoopbackMesh, index: usize, room: &str, interval: u64) -> Result<Bot> {
    let mut participant = Participant::new(
        SessionConfig::default().with_display_name(format!("Bot {}", index + 1)),
        Arc::new(mesh.clone()),
        Arc::new(VirtualDevices::default_rig()),
        Arc::new(TracingView),
        Arc::new(NoopAnalytics),
    );
    participant.start().await?;

    let (commands, rx) = mpsc::channel(8);
    let run = tokio::spawn(participant.run(rx));
    commands
        .send(ParticipantCommand::Join {
            room_id: room.to_owned(),
        })
        .await?;

    let ticks = commands.clone();
    let ticker = tokio::spawn(async move {
        let mut timer = tokio::time::interval(Duration::from_secs(interval.max(1)));
        timer.tick().await;
        let mut n = index;
        loop {
            timer.tick().await;
            let delta = if n % 2 == 0 {
                EmotionDelta::Closer
            } else {
                EmotionDelta::Farther
            };
            n += 1;
            if ticks
                .send(ParticipantCommand::ShiftEmotion(delta))
                .await
                .is_err()
            {
                break;
            }
        }
    });

    Ok(Bot {
        commands,
        run,
        ticker,
    })
}

fn prompt_loop(
    commands: mpsc::Sender<ParticipantCommand>,
    room: String,
    cameras: Vec<DeviceInfo>,
) -> Result<()> {
    loop {
        let choice = Select::new()
            .with_prompt("Action")
            .items(&ACTIONS[..])
            .default(0)
            .interact()?;

        let command = match ACTIONS[choice] {
            "→ closer" => ParticipantCommand::ShiftEmotion(EmotionDelta::Closer),
            "← farther" => ParticipantCommand::ShiftEmotion(EmotionDelta::Farther),
            "rename" => {
                let name: String = Input::new().with_prompt("Name").interact_text()?;
                ParticipantCommand::SetDisplayName(name)
            }
            "toggle audio" => ParticipantCommand::Toggle(MediaKind::Audio),
            "toggle video" => ParticipantCommand::Toggle(MediaKind::Video),
            "switch camera" => {
                let labels: Vec<String> = cameras
                    .iter()
                    .map(|c| format!("{} ({})", c.label, c.device_id))
                    .collect();
                let picked = Select::new()
                    .with_prompt("Camera")
                    .items(&labels[..])
                    .default(0)
                    .interact()?;
                ParticipantCommand::SelectDevice {
                    kind: MediaKind::Video,
                    device_id: cameras[picked].device_id.clone(),
                }
            }
            "leave" => ParticipantCommand::Leave,
            "rejoin" => ParticipantCommand::Join {
                room_id: room.clone(),
            },
            _ => break,
        };

        debug!("Prompt sent {:?}", command);
        if commands.blocking_send(command).is_err() {
            break;
        }
    }
    Ok(())
}

/// Printed once the join is queued. The view reports when the room opens.
fn joining_banner(room: &str) -> String {
    format!("🚀 Joining the loopback room {}…", room)
}
