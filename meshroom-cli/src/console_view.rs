use colored::*;
use meshroom::model::{EmotionLevel, PeerId};
use meshroom::session::{MediaStream, RoomView};
use std::sync::Arc;

/// Prints room activity to stdout.
pub struct ConsoleView;

impl RoomView for ConsoleView {
    fn notice(&self, text: &str) {
        println!("{} {}", "•".blue(), text);
    }

    fn show_local(&self, name: &str, emotion: EmotionLevel) {
        println!(
            "{} {} [{} {}]",
            "you".green().bold(),
            name,
            emotion.value(),
            emotion.label()
        );
    }

    fn attach(&self, peer_id: &PeerId, stream: &Arc<MediaStream>, label: &str) {
        let tracks: Vec<_> = stream
            .tracks()
            .iter()
            .map(|t| format!("{}:{}", t.kind(), t.device_id().unwrap_or("-")))
            .collect();
        println!(
            "{} {} ({}) {}",
            "+".green(),
            label.bold(),
            short(peer_id),
            tracks.join(" ").dimmed()
        );
    }

    fn detach(&self, peer_id: &PeerId) {
        println!("{} {}", "-".red(), short(peer_id));
    }

    fn rename(&self, peer_id: &PeerId, name: &str) {
        println!("{} {} is {}", "~".yellow(), short(peer_id), name.bold());
    }

    fn show_emotion(&self, peer_id: &PeerId, emotion: EmotionLevel) {
        println!(
            "{} {} feels {}",
            "♥".magenta(),
            short(peer_id),
            emotion.label()
        );
    }
}

fn short(peer_id: &PeerId) -> &str {
    let id = peer_id.as_str();
    id.get(..8).unwrap_or(id)
}
