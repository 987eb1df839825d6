//! The dual-mode file uploader component.
//!
//! Wires the pure core to the browser: drag-and-drop and file-picker
//! intake, the mode toggle, the transition-window timer, session
//! preference persistence, live-region announcements, and DOM
//! `CustomEvent` dispatch on the component root.
//!
//! Communication is strictly event-outbound: the component emits the
//! documented vocabulary (both as DOM events and through the
//! `EventHandler` props) and holds no references to its host.

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use gloo_timers::future::TimeoutFuture;
use pdfsmaller_uploader::{
    IntakeSource, IntakeStart, Mode, ModeChangeTrigger, PreferenceStore, ResolveOptions,
    UploaderAttributes, UploaderConfig, UploaderCore, UploaderEvent, announce, intake, validate,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::components::file_list::FileList;
use crate::components::toggle::ModeToggle;
use crate::dispatch;
use crate::files::FileRef;
use crate::live_region::{self, Assertiveness};
use crate::motion;
use crate::storage::SessionBackend;

/// Per-instance element id counter; ids must be unique because event
/// dispatch and focus management address elements by id.
static NEXT_INSTANCE: AtomicUsize = AtomicUsize::new(0);

/// Props for the [`FileUploader`] component.
///
/// String-valued props mirror the element attribute surface; malformed
/// values fall back to defaults and are reported via
/// `attribute-validation-error` events rather than failing.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploaderProps {
    /// Comma-separated accept list (extensions and/or MIME types).
    #[props(default)]
    pub accept: Option<String>,
    /// Legacy multi-select flag; lowest-priority mode input.
    #[props(default)]
    pub multiple: bool,
    /// Human-readable size cap, e.g. `"50MB"`.
    #[props(default)]
    pub max_size: Option<String>,
    /// Disables the whole component.
    #[props(default)]
    pub disabled: ReadOnlySignal<bool>,
    /// Explicit starting mode (`"single"` / `"batch"`).
    #[props(default)]
    pub default_mode: Option<String>,
    /// Session preference memory; enabled when present and not
    /// `"false"`.
    #[props(default)]
    pub remember_preference: Option<String>,
    /// Disables only the mode toggle.
    #[props(default)]
    pub toggle_disabled: ReadOnlySignal<bool>,
    /// Preference-store key override for instance isolation.
    #[props(default)]
    pub preference_key: Option<String>,
    /// Fired for every event in the vocabulary.
    #[props(default)]
    pub on_event: EventHandler<UploaderEvent>,
    /// Fired with the full file list after accepted files were added.
    #[props(default)]
    pub on_files_selected: EventHandler<Vec<FileRef>>,
    /// Fired with the full file list after any other list mutation.
    #[props(default)]
    pub on_files_changed: EventHandler<Vec<FileRef>>,
    /// Fired with the new mode after a successful switch.
    #[props(default)]
    pub on_mode_changed: EventHandler<Mode>,
    /// Fired with the consolidated message on validation or processing
    /// failures.
    #[props(default)]
    pub on_error: EventHandler<String>,
}

/// Everything the component owns, behind one signal.
struct Host {
    core: UploaderCore<FileRef>,
    root_id: String,
    /// Construction events waiting for the root element to mount.
    pending_init: Vec<UploaderEvent>,
}

/// The component's outbound channels, copied into handlers.
#[derive(Clone, Copy)]
struct Handlers {
    on_event: EventHandler<UploaderEvent>,
    on_files_selected: EventHandler<Vec<FileRef>>,
    on_files_changed: EventHandler<Vec<FileRef>>,
    on_mode_changed: EventHandler<Mode>,
    on_error: EventHandler<String>,
}

/// The dual-mode (single/batch) file uploader.
#[component]
#[allow(clippy::too_many_lines)]
pub fn FileUploader(props: FileUploaderProps) -> Element {
    let store = use_hook(|| Rc::new(PreferenceStore::new(SessionBackend::new())));
    let reduced_motion = use_hook(motion::prefers_reduced_motion);

    let mut host = use_signal({
        let store = Rc::clone(&store);
        let props = props.clone();
        move || boot(&props, &store, reduced_motion)
    });

    let handlers = Handlers {
        on_event: props.on_event,
        on_files_selected: props.on_files_selected,
        on_files_changed: props.on_files_changed,
        on_mode_changed: props.on_mode_changed,
        on_error: props.on_error,
    };

    // Flush construction events once the root element exists.
    use_effect(move || {
        let pending: Vec<UploaderEvent> = host.write().pending_init.drain(..).collect();
        emit_all(host, handlers, &pending);
    });

    // Reflect the two runtime-changeable flags into the core, with the
    // documented announcement and focus behavior.
    let disabled_prop = props.disabled;
    let toggle_disabled_prop = props.toggle_disabled;
    use_effect(move || {
        let component_disabled = disabled_prop();
        let toggle_disabled = toggle_disabled_prop();
        let changed = {
            let mut guard = host.write();
            let a = guard.core.set_disabled(component_disabled);
            let b = guard.core.set_toggle_disabled(toggle_disabled);
            a || b
        };
        if changed {
            let now_disabled = host.peek().core.is_toggle_disabled();
            live_region::announce(
                announce::toggle_state_changed(now_disabled),
                Assertiveness::Assertive,
            );
            if now_disabled {
                let root = host.peek().root_id.clone();
                move_focus_off_toggle(
                    &format!("{root}-toggle"),
                    &format!("{root}-area"),
                    !component_disabled,
                );
            }
        }
    });

    let store_for_toggle = Rc::clone(&store);
    let request_toggle = move |trigger: ModeChangeTrigger| {
        change_mode(host, handlers, &store_for_toggle, trigger);
    };

    let mut warnings = use_signal(Vec::<String>::new);

    // --- Render data ----------------------------------------------------
    let guard = host.read();
    let root_id = guard.root_id.clone();
    let input_id = format!("{root_id}-input");
    let toggle_id = format!("{root_id}-toggle");
    let area_id = format!("{root_id}-area");
    let mode = guard.core.mode();
    let mode_config = mode.config();
    let component_disabled = guard.core.is_disabled();
    let toggle_disabled = guard.core.is_toggle_disabled();
    let transitioning = guard.core.is_transitioning();
    let is_drag_over = guard.core.is_drag_over();
    let is_processing = guard.core.is_processing();
    let error = guard.core.error().map(str::to_owned);
    let files = guard.core.files().to_vec();
    let accept_attr = guard.core.config().accept.describe().to_owned();
    let fallback = guard.core.state().initialization_error;
    drop(guard);

    if fallback {
        // Degraded construction: a bare file control honoring accept and
        // the legacy multiple flag; advanced features disabled.
        return rsx! {
            div { class: "p-4 border border-[var(--border-muted)] rounded",
                p { class: "text-[var(--text-error)] text-sm mb-2",
                    "The uploader could not start; basic file selection is still available."
                }
                input {
                    r#type: "file",
                    accept: "{accept_attr}",
                    multiple: props.multiple,
                    onchange: move |evt: FormEvent| {
                        let refs: Vec<FileRef> =
                            evt.files().into_iter().map(FileRef::new).collect();
                        handlers.on_files_selected.call(refs);
                    },
                }
            }
        };
    }

    let area_message = if is_processing {
        mode_config.processing_message
    } else if is_drag_over {
        mode_config.drag_message
    } else {
        mode_config.instructions
    };

    let area_class = if component_disabled {
        "border-[var(--border-muted)] bg-[var(--surface)] opacity-60 cursor-not-allowed"
    } else if is_drag_over {
        "border-[var(--border-accent)] bg-[var(--surface-active)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface)] cursor-pointer"
    };

    let input_id_open = input_id.clone();
    let input_id_keys = input_id.clone();
    let input_id_change = input_id.clone();

    rsx! {
        div {
            id: "{root_id}",
            class: "w-full max-w-xl",
            "aria-busy": "{is_processing}",

            // Mode toggle row
            div { class: "flex items-center justify-between mb-3",
                ModeToggle {
                    id: toggle_id,
                    mode,
                    disabled: toggle_disabled,
                    transitioning,
                    reduced_motion,
                    on_toggle: request_toggle,
                }
                span { class: "text-xs text-[var(--muted)]", "{mode_config.label}" }
            }

            // Upload area
            div {
                id: "{area_id}",
                class: "border-2 border-dashed rounded-lg p-6 text-center transition-colors {area_class}",
                role: "button",
                tabindex: if component_disabled { "-1" } else { "0" },
                aria_label: "{mode_config.aria_label}",
                "aria-disabled": "{component_disabled}",

                ondragenter: move |evt: DragEvent| {
                    evt.prevent_default();
                    let count = evt.files().len();
                    let events = host.write().core.drag_enter(count);
                    emit_all(host, handlers, &events);
                },
                ondragover: move |evt: DragEvent| {
                    evt.prevent_default();
                    let count = evt.files().len();
                    let events = host.peek().core.drag_over(count);
                    emit_all(host, handlers, &events);
                },
                ondragleave: move |_| {
                    let events = host.write().core.drag_leave();
                    emit_all(host, handlers, &events);
                },
                ondrop: move |evt: DragEvent| {
                    evt.prevent_default();
                    let dropped = evt.files();
                    let events = host.write().core.drop_received(dropped.len());
                    emit_all(host, handlers, &events);
                    spawn(run_file_intake(
                        host,
                        handlers,
                        dropped,
                        IntakeSource::Drop,
                        warnings,
                    ));
                },
                onclick: move |_| {
                    if !component_disabled && !is_processing {
                        open_file_dialog(&input_id_open);
                    }
                },
                onkeydown: move |evt: KeyboardEvent| {
                    let open = matches!(evt.key(), Key::Enter)
                        || matches!(evt.key(), Key::Character(ref c) if c == " ");
                    if open {
                        evt.prevent_default();
                        if !component_disabled && !is_processing {
                            open_file_dialog(&input_id_keys);
                        }
                    }
                },

                Icon {
                    width: 32,
                    height: 32,
                    icon: LdUpload,
                }
                p { class: "text-[var(--text-secondary)] mt-2 mb-3", "{area_message}" }

                label {
                    class: "inline-block px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded cursor-pointer text-white font-medium transition-colors",
                    onclick: move |evt| evt.stop_propagation(),
                    input {
                        id: "{input_id}",
                        r#type: "file",
                        accept: "{accept_attr}",
                        multiple: mode == Mode::Batch,
                        disabled: component_disabled,
                        class: "hidden",
                        onchange: move |evt: FormEvent| {
                            let selected = evt.files();
                            reset_file_input(&input_id_change);
                            spawn(run_file_intake(
                                host,
                                handlers,
                                selected,
                                IntakeSource::Selection,
                                warnings,
                            ));
                        },
                    }
                    if mode == Mode::Batch { "Choose files" } else { "Choose file" }
                }
            }

            // Inline error region: one consolidated string.
            if let Some(ref message) = error {
                p {
                    class: "mt-2 text-sm text-[var(--text-error)] whitespace-pre-line",
                    role: "alert",
                    "{message}"
                }
            }

            // Non-blocking warnings; never populate the error region.
            if !warnings.read().is_empty() {
                ul { class: "mt-2 space-y-0.5",
                    for warning in warnings.read().iter() {
                        li { class: "text-xs text-[var(--text-warning)]", "{warning}" }
                    }
                }
            }

            if files.is_empty() {
                p { class: "mt-3 text-sm text-[var(--muted)]", "{mode_config.empty_message}" }
            } else {
                FileList {
                    files: files.clone(),
                    disabled: component_disabled,
                    on_remove: move |index: usize| {
                        let removed = host.write().core.remove_file(index);
                        if let Some(events) = removed {
                            emit_all(host, handlers, &events);
                        }
                    },
                }
            }
        }
    }
}

/// Parse props, resolve the initial mode, and build the core plus its
/// construction events.
fn boot(
    props: &FileUploaderProps,
    store: &PreferenceStore<SessionBackend>,
    reduced_motion: bool,
) -> Host {
    let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
    let root_id = format!("pdfsmaller-uploader-{instance}");

    let attrs = UploaderAttributes {
        accept: props.accept.clone(),
        multiple: props.multiple,
        max_size: props.max_size.clone(),
        disabled: (props.disabled)(),
        default_mode: props.default_mode.clone(),
        remember_preference: props.remember_preference.clone(),
        toggle_disabled: (props.toggle_disabled)(),
        preference_key: props.preference_key.clone(),
    };
    let (config, issues) = UploaderConfig::from_attributes(&attrs);

    // The default-mode issue is owned by the resolver (the raw value
    // participates in resolution priority); report the rest here.
    let mut pending_init: Vec<UploaderEvent> = Vec::new();
    for issue in issues
        .iter()
        .filter(|issue| issue.attribute != "default-mode")
    {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "pdfsmaller: {}",
            issue.message
        )));
        pending_init.push(UploaderEvent::AttributeValidationError {
            attribute: issue.attribute.to_owned(),
            value: issue.value.clone(),
            error: issue.message.clone(),
        });
    }

    let resolution = store.resolve_initial(
        ResolveOptions {
            legacy_multiple: config.legacy_multiple,
            default_mode: attrs.default_mode.as_deref(),
            remember_preference: config.remember_preference,
            key: &config.preference_key,
        },
        dispatch::now_iso(),
    );

    let (core, events) = UploaderCore::new(config, resolution, reduced_motion);
    pending_init.extend(events);

    Host {
        core,
        root_id,
        pending_init,
    }
}

/// Dispatch events as DOM `CustomEvent`s and route them to the
/// component's `EventHandler` props.
fn emit_all(host: Signal<Host>, handlers: Handlers, events: &[UploaderEvent]) {
    if events.is_empty() {
        return;
    }
    let root_id = host.peek().root_id.clone();
    for event in events {
        dispatch::dispatch(&root_id, event);
        handlers.on_event.call(event.clone());
        match event {
            UploaderEvent::FilesSelected { .. } => {
                handlers
                    .on_files_selected
                    .call(host.peek().core.files().to_vec());
            }
            UploaderEvent::FilesChanged { .. } => {
                handlers
                    .on_files_changed
                    .call(host.peek().core.files().to_vec());
            }
            UploaderEvent::ModeChanged { new_mode, .. } => {
                handlers.on_mode_changed.call(*new_mode);
            }
            UploaderEvent::ProcessingError { error } => {
                handlers.on_error.call(error.clone());
            }
            UploaderEvent::ValidationError { errors, .. } => {
                handlers.on_error.call(errors.join("\n"));
            }
            _ => {}
        }
    }
}

/// Toggle the mode, then persist, announce, and schedule the end of the
/// transition window.
fn change_mode(
    mut host: Signal<Host>,
    handlers: Handlers,
    store: &PreferenceStore<SessionBackend>,
    trigger: ModeChangeTrigger,
) {
    let outcome = host.write().core.toggle_mode(trigger);
    emit_all(host, handlers, &outcome.events);
    if !outcome.changed {
        return;
    }

    let (new_mode, kept, remember, key, window_ms) = {
        let guard = host.peek();
        (
            guard.core.mode(),
            guard.core.file_count(),
            guard.core.config().remember_preference,
            guard.core.config().preference_key.clone(),
            guard.core.transition_window_ms(),
        )
    };

    if remember {
        let _ = store.handle_mode_change(new_mode, true, &key, dispatch::now_iso());
    }
    live_region::announce(
        &announce::mode_changed(new_mode, trigger, kept, outcome.truncated_from),
        Assertiveness::Polite,
    );
    if window_ms > 0 {
        spawn(async move {
            TimeoutFuture::new(window_ms).await;
            host.write().core.end_transition();
        });
    }
}

/// Drive one intake: admission, adaptation, prefix reads for PDF-typed
/// files, validation, completion, announcement.
async fn run_file_intake(
    mut host: Signal<Host>,
    handlers: Handlers,
    files: Vec<FileData>,
    source: IntakeSource,
    mut warnings: Signal<Vec<String>>,
) {
    let refs: Vec<FileRef> = files.into_iter().map(FileRef::new).collect();
    let intake_start = host.write().core.begin_intake(refs.len());
    match intake_start {
        IntakeStart::Rejected { events, .. } => {
            emit_all(host, handlers, &events);
        }
        IntakeStart::Started { events } => {
            emit_all(host, handlers, &events);

            let mode = host.peek().core.mode();
            let (adapted, adaptation) = intake::adapt_intake(refs, mode, source);

            // The only asynchronous step: read the leading bytes of
            // PDF-typed files for the signature check.
            let mut prefixes = Vec::with_capacity(adapted.len());
            for file in &adapted {
                if validate::needs_signature_check(file) {
                    prefixes.push(Some(file.read_prefix().await));
                } else {
                    prefixes.push(None);
                }
            }

            let outcome = {
                let guard = host.peek();
                intake::run_intake(adapted, guard.core.config(), &prefixes)
            };
            let completion = host.write().core.complete_intake(outcome, adaptation);

            let warning_list = completion
                .events
                .iter()
                .find_map(|event| match event {
                    UploaderEvent::ValidationWarning { warnings, .. } => Some(warnings.clone()),
                    _ => None,
                })
                .unwrap_or_default();
            warnings.set(warning_list);

            emit_all(host, handlers, &completion.events);
            live_region::announce(
                &announce::intake_summary(completion.accepted, completion.rejected),
                Assertiveness::Polite,
            );
        }
    }
}

/// Open the hidden file input's dialog.
///
/// The uploader's input id is `<root id>-input`; hosts driving the
/// component programmatically can call this with that id.
pub fn open_file_dialog(input_id: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(input) = document
        .get_element_by_id(input_id)
        .and_then(|e| e.dyn_into::<web_sys::HtmlInputElement>().ok())
    {
        input.click();
    }
}

/// Clear the file input so re-selecting the same file fires `change`.
fn reset_file_input(input_id: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(input) = document
        .get_element_by_id(input_id)
        .and_then(|e| e.dyn_into::<web_sys::HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}

/// When the toggle is disabled while focused, move focus to the upload
/// area if the component is enabled, otherwise release it.
fn move_focus_off_toggle(toggle_id: &str, area_id: &str, component_enabled: bool) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(active) = document.active_element() else {
        return;
    };
    if active.id() != toggle_id {
        return;
    }
    if component_enabled {
        if let Some(area) = document
            .get_element_by_id(area_id)
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = area.focus();
            return;
        }
    }
    if let Ok(element) = active.dyn_into::<web_sys::HtmlElement>() {
        let _ = element.blur();
    }
}
