use tracing::trace;

use crate::env::{Presenter, SoundEvent, SoundSink};

use super::events::BattleEvent;

/// Side effects of a battle: presentation, audio and the event queue.
#[derive(Default)]
pub(crate) struct Outputs {
    presenter: Option<Box<dyn Presenter>>,
    sound: Option<Box<dyn SoundSink>>,
    events: Vec<BattleEvent>,
}

impl Outputs {
    pub(crate) fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = Some(presenter);
    }

    pub(crate) fn set_sound(&mut self, sound: Box<dyn SoundSink>) {
        self.sound = Some(sound);
    }

    pub(crate) fn present(&mut self, f: impl FnOnce(&mut dyn Presenter)) {
        match self.presenter.as_deref_mut() {
            Some(presenter) => f(presenter),
            None => trace!("no presenter attached; skipping"),
        }
    }

    pub(crate) fn message(&mut self, text: &str) {
        self.present(|p| p.show_message(text));
    }

    pub(crate) fn play(&mut self, event: SoundEvent) {
        match self.sound.as_deref_mut() {
            Some(sink) => sink.play(event),
            None => trace!(%event, "no sound sink attached; skipping"),
        }
    }

    pub(crate) fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }
}

impl core::fmt::Debug for Outputs {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Outputs")
            .field("presenter", &self.presenter.is_some())
            .field("sound", &self.sound.is_some())
            .field("events", &self.events.len())
            .finish()
    }
}
