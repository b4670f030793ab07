use std::{fs, path::Path};

use log::*;
use thiserror::Error;

use crate::db_types::{AgendaItem, Event};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Could not read the seed file. {0}")]
    IoError(#[from] std::io::Error),
    #[error("The seed file is not a valid JSON array of listings. {0}")]
    FormatError(#[from] serde_json::Error),
    #[error("Listing id {0} leaves no room for new listings")]
    IdOutOfRange(i64),
}

/// Reads a JSON array of listings from `path`.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<Event>, SeedError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let events = serde_json::from_str::<Vec<Event>>(&data)?;
    if let Some(e) = events.iter().find(|e| e.id == i64::MAX) {
        return Err(SeedError::IdOutOfRange(e.id));
    }
    info!("📚️ Loaded {} listings from {}", events.len(), path.display());
    Ok(events)
}

fn agenda(items: &[(&str, &str, &str)]) -> Vec<AgendaItem> {
    items
        .iter()
        .map(|(time, session, speaker)| AgendaItem {
            time: time.to_string(),
            session: session.to_string(),
            speaker: speaker.to_string(),
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The listings the events catalog starts with when no seed file is configured.
pub fn default_events() -> Vec<Event> {
    vec![
        Event {
            id: 1,
            title: "AI and Machine Learning Summit 2024".into(),
            organizer: "Tech Corp".into(),
            date: "November 15, 2024".into(),
            location: "New York City, NY".into(),
            price: "Free".into(),
            image_url: "https://www.rrce.org/blog/wp-content/uploads/2022/11/Artifical-Intelligence.-Machine-Learning-at-RRCE.png".into(),
            description: "A one-day summit to explore the latest trends and innovations in AI and Machine Learning.".into(),
            highlights: strings(&["Networking Opportunities", "Hands-on Workshops", "Expert Panel Discussions"]),
            agenda: agenda(&[
                ("10:00 AM - 11:00 AM", "Keynote: The Future of AI", "Dr. Jane Doe"),
                ("11:30 AM - 1:00 PM", "Workshop: Building Machine Learning Models", "John Smith"),
                ("2:00 PM - 3:30 PM", "Panel Discussion: Ethics in AI", "Various Industry Leaders"),
            ]),
            version: 1,
        },
        Event {
            id: 2,
            title: "Web Development Bootcamp".into(),
            organizer: "Code Academy".into(),
            date: "December 5-7, 2024".into(),
            location: "Online".into(),
            price: "1,999 Rs".into(),
            image_url: "https://media.geeksforgeeks.org/wp-content/uploads/20231205165904/web-development-image.webp".into(),
            description: "A 3-day bootcamp to master the fundamentals of web development.".into(),
            highlights: strings(&["Live Coding Sessions", "Real-World Projects", "Interactive Q&A"]),
            agenda: agenda(&[
                ("Day 1: 9:00 AM - 5:00 PM", "Introduction to HTML & CSS", "Alice Johnson"),
                ("Day 2: 9:00 AM - 5:00 PM", "JavaScript for Beginners", "Bob Williams"),
                ("Day 3: 9:00 AM - 5:00 PM", "Building and Deploying a Website", "Charlie Brown"),
            ]),
            version: 1,
        },
    ]
}
