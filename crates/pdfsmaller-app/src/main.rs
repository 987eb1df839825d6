use dioxus::prelude::*;
use pdfsmaller_ui::{FileRef, FileUploader};
use pdfsmaller_uploader::config::format_size;
use pdfsmaller_uploader::{FileLike, Mode, UploaderEvent};

fn main() {
    console_error_panic_hook::set_once();
    dioxus::launch(app);
}

/// Cap on the event feed so long sessions do not grow the DOM without
/// bound.
const MAX_FEED_LINES: usize = 30;

/// Root application component.
///
/// Mounts the dual-mode uploader and reacts to its event vocabulary:
/// the file list and mode are mirrored into page state, and every
/// event lands in a newest-first feed. Communication is one-way — the
/// uploader knows nothing about this shell.
fn app() -> Element {
    let mut files = use_signal(Vec::<FileRef>::new);
    let mut mode = use_signal(|| Mode::Single);
    let mut last_error = use_signal(|| Option::<String>::None);
    let mut feed = use_signal(Vec::<String>::new);

    let on_event = move |event: UploaderEvent| {
        let line = match &event {
            UploaderEvent::FilesProcessed {
                valid_files,
                total_files,
                ..
            } => format!("files-processed ({valid_files}/{total_files} accepted)"),
            UploaderEvent::ModeChanged {
                old_mode, new_mode, ..
            } => format!("mode-changed ({old_mode} -> {new_mode})"),
            other => other.name().to_owned(),
        };
        let mut log = feed.write();
        log.insert(0, line);
        log.truncate(MAX_FEED_LINES);
    };

    let total_size: u64 = files.read().iter().map(FileLike::size).sum();
    let file_count = files.read().len();

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { "PDFSmaller" }
                p { class: "tagline", "Compress PDF files right in your browser" }
            }

            main { class: "page-main",
                section { class: "uploader-panel",
                    FileUploader {
                        accept: ".pdf,application/pdf".to_owned(),
                        max_size: "50MB".to_owned(),
                        default_mode: "single".to_owned(),
                        remember_preference: "true".to_owned(),
                        on_event,
                        on_files_selected: move |selected: Vec<FileRef>| {
                            files.set(selected);
                            last_error.set(None);
                        },
                        on_files_changed: move |current: Vec<FileRef>| {
                            files.set(current);
                        },
                        on_mode_changed: move |new_mode: Mode| {
                            mode.set(new_mode);
                        },
                        on_error: move |message: String| {
                            last_error.set(Some(message));
                        },
                    }

                    if file_count > 0 {
                        p { class: "summary",
                            "Ready to compress {file_count} file(s), {format_size(total_size)} total, in {mode} mode."
                        }
                    }
                }

                aside { class: "event-feed",
                    h2 { "Events" }
                    if feed.read().is_empty() {
                        p { class: "muted", "Nothing yet. Drop a PDF to get started." }
                    } else {
                        ul {
                            for (index, line) in feed.read().iter().enumerate() {
                                li { key: "{index}", "{line}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
