use meshroom_core::{ControlMessage, DeviceInfo, EmotionDelta, EmotionLevel, MediaKind};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::analytics::{AnalyticsSink, sample_now};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::media::{DeviceSwitcher, LocalSession, MediaDevices, MediaStream, SwitchOutcome};
use crate::participant::ParticipantCommand;
use crate::room::{LocalProfile, RoomEvent, RoomSession, RoomState};
use crate::transport::MeshTransport;
use crate::view::RoomView;

/// The local user: owns the capture, the profile and at most one room
/// session, and threads them through every handler.
pub struct Participant {
    config: SessionConfig,
    profile: LocalProfile,
    local: LocalSession,
    room: Option<RoomSession>,
    switcher: DeviceSwitcher,

    transport: Arc<dyn MeshTransport>,
    view: Arc<dyn RoomView>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl Participant {
    /// Must be called inside a tokio runtime: the device switcher runs on
    /// its own task.
    pub fn new(
        config: SessionConfig,
        transport: Arc<dyn MeshTransport>,
        devices: Arc<dyn MediaDevices>,
        view: Arc<dyn RoomView>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            profile: LocalProfile::new(config.display_name.clone()),
            local: LocalSession::new(Arc::clone(&devices)),
            room: None,
            switcher: DeviceSwitcher::spawn(devices),
            config,
            transport,
            view,
            analytics,
        }
    }

    pub fn profile(&self) -> &LocalProfile {
        &self.profile
    }

    pub fn local(&self) -> &LocalSession {
        &self.local
    }

    pub fn room(&self) -> Option<&RoomSession> {
        self.room.as_ref()
    }

    pub fn room_state(&self) -> RoomState {
        self.room.as_ref().map_or(RoomState::Idle, RoomSession::state)
    }

    /// Opens the first capture stream.
    pub async fn start(&mut self) -> Result<Arc<MediaStream>, SessionError> {
        let stream = self
            .local
            .acquire(self.config.initial_constraints.clone())
            .await?;
        self.view
            .show_local(&self.profile.display_name, self.profile.emotion);
        Ok(stream)
    }

    /// Capture devices, or nothing when enumeration fails.
    pub async fn devices(&self) -> Vec<DeviceInfo> {
        match self.local.devices().enumerate().await {
            Ok(devices) => devices,
            Err(e) => {
                debug!("Device enumeration failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Starts a fresh room session. A previous, closed session is dropped.
    pub async fn join(&mut self, room_id: &str) -> Result<(), SessionError> {
        let state = self.room_state();
        if state.is_active() {
            return Err(SessionError::AlreadyInRoom(state));
        }
        let stream = self
            .local
            .stream()
            .cloned()
            .ok_or(SessionError::NoLocalStream)?;

        let mut room = RoomSession::new(&self.config, Arc::clone(&self.view));
        room.join(self.transport.as_ref(), room_id, stream).await?;
        self.room = Some(room);
        Ok(())
    }

    pub async fn leave(&mut self) {
        if let Some(room) = self.room.as_mut() {
            room.leave().await;
        }
    }

    /// Renames the local user and tells the room, if joined.
    pub async fn set_display_name(&mut self, name: impl Into<String>) {
        self.profile.display_name = name.into();
        self.view
            .show_local(&self.profile.display_name, self.profile.emotion);
        if let Some(room) = &self.room {
            room.broadcast(&self.profile.name_message()).await;
        }
    }

    /// One step on the emotion scale.
    ///
    /// The local display always follows; the broadcast is attempted once and
    /// dropped if the room is not joined. Only a sent change is recorded to
    /// analytics. Returns `None` when already at the bound.
    pub async fn shift_emotion(&mut self, delta: EmotionDelta) -> Option<EmotionLevel> {
        let next = self.profile.emotion.step(delta)?;
        self.profile.emotion = next;
        self.view.show_local(&self.profile.display_name, next);

        let Some(room) = &self.room else {
            return Some(next);
        };
        if room.broadcast(&ControlMessage::Emotion(next)).await {
            if let Some(room_id) = room.room_id() {
                self.analytics
                    .record(sample_now(room_id, &self.profile.display_name, next));
            }
        }
        Some(next)
    }

    pub fn set_enabled(&mut self, kind: MediaKind, enabled: bool) {
        self.local.set_enabled(kind, enabled);
    }

    pub fn toggle(&mut self, kind: MediaKind) -> bool {
        self.local.toggle(kind)
    }

    /// Requests a capture device change. Applied when the switch completes;
    /// a newer request made before this one starts replaces it.
    pub fn select_device(&mut self, kind: MediaKind, device_id: &str) -> u64 {
        let constraints = self.local.select_device(kind, device_id);
        let seq = self.switcher.request(constraints);
        debug!("Queued {} device change #{} to {}", kind, seq, device_id);
        seq
    }

    /// Waits for the next finished device change and applies it.
    pub async fn finish_device_switch(&mut self) -> bool {
        match self.switcher.next_outcome().await {
            Some(outcome) => self.apply_switch(outcome).await,
            None => false,
        }
    }

    async fn apply_switch(&mut self, outcome: SwitchOutcome) -> bool {
        let SwitchOutcome { request, result } = outcome;
        match result {
            Ok(stream) => {
                let stream = self.local.install(stream, request.constraints);
                if let Some(room) = &self.room {
                    room.replace_stream(stream).await;
                }
                true
            }
            Err(e) => {
                warn!("Device change #{} failed: {}", request.seq, e);
                if request.seq == self.switcher.latest_seq() {
                    self.local.reset_selection();
                }
                false
            }
        }
    }

    pub async fn handle_room_event(&mut self, event: RoomEvent) {
        if let Some(room) = self.room.as_mut() {
            room.handle_event(event, &mut self.profile).await;
        }
    }

    /// Waits for the next room event and handles it.
    pub async fn process_next_room_event(&mut self) {
        let event = next_room_event(&mut self.room).await;
        self.handle_room_event(event).await;
    }

    pub async fn expire_join(&mut self) -> bool {
        match self.room.as_mut() {
            Some(room) => room.expire_join().await,
            None => false,
        }
    }

    pub async fn handle_command(&mut self, command: ParticipantCommand) {
        match command {
            ParticipantCommand::Join { room_id } => {
                if let Err(e) = self.join(&room_id).await {
                    error!("Cannot join {:?}: {}", room_id, e);
                    self.view.notice(&e.to_string());
                }
            }
            ParticipantCommand::Leave => self.leave().await,
            ParticipantCommand::SetDisplayName(name) => self.set_display_name(name).await,
            ParticipantCommand::ShiftEmotion(delta) => {
                self.shift_emotion(delta).await;
            }
            ParticipantCommand::SetEnabled { kind, enabled } => self.set_enabled(kind, enabled),
            ParticipantCommand::Toggle(kind) => {
                self.toggle(kind);
            }
            ParticipantCommand::SelectDevice { kind, device_id } => {
                self.select_device(kind, &device_id);
            }
        }
    }

    /// Event loop: user commands, room events, finished device changes and
    /// the join deadline, one at a time. Returns when the command channel
    /// closes, leaving any room first.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ParticipantCommand>) {
        info!("Participant event loop started");

        loop {
            let deadline = self.room.as_ref().and_then(RoomSession::join_deadline);

            tokio::select! {
                cmd = commands.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Leaving.");
                            break;
                        }
                    }
                }

                event = next_room_event(&mut self.room) => {
                    self.handle_room_event(event).await;
                }

                Some(outcome) = self.switcher.next_outcome() => {
                    self.apply_switch(outcome).await;
                }

                _ = sleep_until(deadline) => {
                    self.expire_join().await;
                }
            }
        }

        self.leave().await;
        self.local.release();
        info!("Participant event loop finished");
    }
}

async fn next_room_event(room: &mut Option<RoomSession>) -> RoomEvent {
    match room {
        Some(room) => room.next_event().await,
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
