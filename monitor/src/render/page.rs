//! Room status page

use chrono::NaiveDateTime;
use easywash_api::{MachineKind, Room};
use maud::{html, Markup, DOCTYPE};

use crate::interpret::{MachineView, StatusClass};

pub const STYLESHEET: &str = "style.css";
pub const REFRESH_SCRIPT: &str = "refresh.js";

pub const DISCLAIMER: &str = "Diese Seite wird von Studenten als inoffizielle Alternative zur \
EasyWash-App betrieben und ist kein Teil des Angebots von Schneidereit GmbH. Alle Angaben ohne Gewähr.";

/// A rendered room page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    html: String,
}

impl Page {
    fn new(markup: Markup) -> Self {
        Self {
            html: markup.into_string(),
        }
    }

    /// Serialized document, doctype included
    pub fn to_html(&self) -> &str {
        &self.html
    }
}

/// Style hook classes of a machine block
pub fn status_classes(status: StatusClass) -> &'static str {
    match status {
        StatusClass::Free => "machine free",
        StatusClass::InUse => "machine inUse",
        StatusClass::Error => "machine error",
        StatusClass::NoSignalError => "machine error noSignal",
    }
}

/// Build the page for a room: washers first, then dryers under their own heading
pub fn render_room(room: &Room, views: &[MachineView], refreshed_at: NaiveDateTime) -> Page {
    let title = format!("Waschmaschinen in {}", room.bezeichnung);
    let washers: Vec<&MachineView> = views
        .iter()
        .filter(|v| v.kind == MachineKind::Washer)
        .collect();
    let dryers: Vec<&MachineView> = views
        .iter()
        .filter(|v| v.kind == MachineKind::Dryer)
        .collect();

    Page::new(html! {
        (DOCTYPE)
        html {
            head {
                title { (title) }
                link rel="stylesheet" href=(STYLESHEET) type="text/css";
                script src=(REFRESH_SCRIPT) {}
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=0.75";
            }
            body {
                h1 { (title) }
                p { (refreshed_at.format("%H:%M").to_string()) " Uhr aktualisiert" }
                @for view in &washers {
                    (machine_block(view))
                }
                @if !dryers.is_empty() {
                    h2 { "Trockner" }
                    @for view in &dryers {
                        (machine_block(view))
                    }
                }
                p.disclaimer { (DISCLAIMER) }
            }
        }
    })
}

fn machine_block(view: &MachineView) -> Markup {
    html! {
        div class=(status_classes(view.status_class)) title=(view.summary) {
            span.machine-id { (view.number) }
            @if let Some(minutes) = view.remaining_minutes {
                span.timeRemaining { (minutes) " min" }
            }
        }
    }
}
