// src/search/mod.rs
pub mod analyzer;
pub mod board;
pub mod notify;
pub mod orchestrator;
pub mod progress;

pub use analyzer::JobAnalyzer;
pub use board::{BoardPhase, BoardSnapshot, JobBoard};
pub use notify::{ConsoleNotifier, Notification, NotificationLevel, Notifier};
pub use orchestrator::{SearchOrchestrator, SearchReport};
pub use progress::{progress_channel, JobProgress, ProgressReceiver, ProgressSender};
