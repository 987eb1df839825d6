//! Removable list of accepted files.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdX};
use pdfsmaller_uploader::FileLike;
use pdfsmaller_uploader::config::format_size;

use crate::files::FileRef;

/// Props for the [`FileList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileListProps {
    /// Files to render, in list order.
    pub files: Vec<FileRef>,
    /// Disables the remove buttons.
    pub disabled: bool,
    /// Called with the index of the file whose remove button was
    /// activated.
    pub on_remove: EventHandler<usize>,
}

/// Renders the held files with name, size, and a remove button, plus a
/// total line when more than one file is held.
#[component]
pub fn FileList(props: FileListProps) -> Element {
    if props.files.is_empty() {
        return rsx! {};
    }
    let total: u64 = props.files.iter().map(FileLike::size).sum();
    let count = props.files.len();
    let on_remove = props.on_remove;

    rsx! {
        ul { class: "mt-3 space-y-1",
            for (index, file) in props.files.iter().enumerate() {
                li {
                    key: "{index}-{file.name()}",
                    class: "flex items-center gap-2 px-2 py-1 rounded bg-[var(--surface)]",

                    Icon {
                        width: 16,
                        height: 16,
                        icon: LdFileText,
                    }
                    span { class: "flex-1 truncate text-sm", "{file.name()}" }
                    span { class: "text-xs text-[var(--muted)]", "{format_size(file.size())}" }
                    button {
                        r#type: "button",
                        class: "p-1 rounded hover:bg-[var(--surface-active)]",
                        aria_label: "Remove {file.name()}",
                        disabled: props.disabled,
                        onclick: move |_| on_remove.call(index),

                        Icon {
                            width: 14,
                            height: 14,
                            icon: LdX,
                        }
                    }
                }
            }
        }
        if count > 1 {
            p { class: "mt-1 text-xs text-[var(--muted)]",
                "{count} files · {format_size(total)}"
            }
        }
    }
}
