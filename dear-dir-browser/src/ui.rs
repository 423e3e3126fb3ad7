use std::path::PathBuf;

use dear_imgui_rs::input::{Key, MouseButton};
use dear_imgui_rs::{SelectableFlags, Ui, WindowFlags};

use crate::browser_events::BrowserEvent;
use crate::browser_state::DirectoryBrowserState;
use crate::core::BrowserFlags;

/// UI handle for the directory browser popup
pub struct DirBrowser<'ui> {
    ui: &'ui Ui,
}

/// Extend Ui with a directory browser entry point
pub trait DirBrowserExt {
    /// Entry point for showing the directory browser popup
    fn dir_browser(&self) -> DirBrowser<'_>;
}

impl DirBrowserExt for Ui {
    fn dir_browser(&self) -> DirBrowser<'_> {
        DirBrowser { ui: self }
    }
}

impl<'ui> DirBrowser<'ui> {
    /// Draw the browser popup (when open) and apply the user's input to `state`.
    ///
    /// Returns the confirmed path for as long as the state stays confirmed;
    /// call [`DirectoryBrowserState::clear_selected`] once it is consumed.
    ///
    /// ```no_run
    /// use dear_dir_browser::{BrowserConfig, DirBrowserExt, DirectoryBrowserState};
    /// # use dear_imgui_rs::*;
    /// # let mut ctx = Context::create();
    /// # let ui = ctx.frame();
    /// let mut browser = DirectoryBrowserState::new(BrowserConfig::new().title("Open"));
    /// browser.set_type_filters([".h", ".cpp"]);
    /// if ui.button("Open...") {
    ///     browser.open();
    /// }
    /// if let Some(path) = ui.dir_browser().show(&mut browser) {
    ///     eprintln!("selected {}", path.display());
    ///     browser.clear_selected();
    /// }
    /// ```
    pub fn show(&self, state: &mut DirectoryBrowserState) -> Option<PathBuf> {
        let ui = self.ui;
        let label = state.popup_label();
        if state.take_open_request() {
            ui.open_popup(&label);
        }

        let flags = state.flags();
        let drawn = if flags.contains(BrowserFlags::NO_MODAL) {
            ui.begin_popup(&label)
                .map(|_popup| draw_popup_body(ui, state))
        } else {
            let window_flags = if flags.contains(BrowserFlags::NO_TITLE_BAR) {
                WindowFlags::NO_TITLE_BAR
            } else {
                WindowFlags::empty()
            };
            ui.begin_modal_popup_config(&label)
                .flags(window_flags)
                .begin()
                .map(|_popup| draw_popup_body(ui, state))
        };

        if drawn.is_none() {
            if state.is_open() {
                // ImGui closed a plain popup on an outside click.
                state.cancel();
            }
            let _ = state.take_close_request();
        }

        state.has_selected().then(|| state.selected_path())
    }
}

fn draw_popup_body(ui: &Ui, state: &mut DirectoryBrowserState) {
    let flags = state.flags();
    let mut events = Vec::new();

    draw_location_bar(ui, state, &mut events);
    if flags.contains(BrowserFlags::CREATE_NEW_DIR) {
        draw_new_dir_popup(ui, state, &mut events);
    }

    let wants_name_input =
        !state.is_directory_mode() && flags.contains(BrowserFlags::ENTER_NEW_FILENAME);
    let mut reserve_height = ui.frame_height_with_spacing();
    if wants_name_input {
        reserve_height += ui.frame_height_with_spacing();
    }
    let list_flags = if flags.contains(BrowserFlags::NO_MODAL) {
        WindowFlags::ALWAYS_HORIZONTAL_SCROLLBAR
    } else {
        WindowFlags::empty()
    };
    let mut list_focused = false;
    ui.child_window("##dir_browser_entries")
        .size([0.0, -reserve_height])
        .border(true)
        .flags(list_flags)
        .build(ui, || {
            list_focused = ui.is_window_focused();
            let selected_name = state.selected_name();
            for (i, e) in state.visible_entries().enumerate() {
                let _id = ui.push_id(i as i32);
                let selected = !selected_name.is_empty() && selected_name == e.name();
                if ui
                    .selectable_config(e.display_label())
                    .selected(selected)
                    .flags(SelectableFlags::NO_AUTO_CLOSE_POPUPS)
                    .build()
                {
                    events.push(BrowserEvent::Select(e.name().to_string()));
                }
                if e.is_dir() && ui.is_item_hovered() && ui.is_mouse_double_clicked(MouseButton::Left)
                {
                    events.push(BrowserEvent::Navigate(e.name().to_string()));
                }
            }
        });

    if wants_name_input {
        ui.set_next_item_width(-1.0);
        if ui
            .input_text("##dir_browser_filename", &mut state.filename_input)
            .build()
        {
            events.push(BrowserEvent::EnterFilename(state.filename_input.clone()));
        }
    }

    if !state.is_directory_mode() {
        if ui.button(" ok ") && !state.selected_name().is_empty() {
            events.push(BrowserEvent::Confirm);
        }
    } else if state.selected_name().is_empty() {
        if ui.button(" ok ") {
            events.push(BrowserEvent::Confirm);
        }
    } else if ui.button("open") {
        events.push(BrowserEvent::OpenSelected);
    }

    ui.same_line();
    // Focus usually sits on the entry list after a click.
    let escape = flags.contains(BrowserFlags::CLOSE_ON_ESC)
        && (list_focused || ui.is_window_focused())
        && ui.is_key_pressed(Key::Escape);
    if ui.button("cancel") || escape {
        events.push(BrowserEvent::Cancel);
    }

    if !state.status_message().is_empty() && !flags.contains(BrowserFlags::NO_STATUS_BAR) {
        ui.same_line();
        ui.text(state.status_message());
    }

    if !state.type_filters().is_empty() {
        ui.same_line();
        ui.set_next_item_width(8.0 * ui.current_font_size());
        let preview = state
            .active_type_filter()
            .map(|f| f.label().to_string())
            .unwrap_or_else(|| "all".to_string());
        if let Some(_combo) = ui.begin_combo("##dir_browser_filters", &preview) {
            if ui
                .selectable_config("all")
                .selected(state.active_filter().is_none())
                .build()
            {
                events.push(BrowserEvent::SetActiveFilter(None));
            }
            for (i, f) in state.type_filters().iter().enumerate() {
                let _id = ui.push_id(i as i32);
                if ui
                    .selectable_config(f.label())
                    .selected(state.active_filter() == Some(i))
                    .build()
                {
                    events.push(BrowserEvent::SetActiveFilter(Some(i)));
                }
            }
        }
    }

    for ev in events {
        let _ = state.handle_event(ev);
    }
    if state.take_close_request() {
        ui.close_current_popup();
    }
}

fn draw_location_bar(ui: &Ui, state: &DirectoryBrowserState, events: &mut Vec<BrowserEvent>) {
    let crumbs = state.breadcrumbs();

    if state.roots().len() > 1 {
        let current_root = crumbs
            .first()
            .map(|(label, _)| label.clone())
            .unwrap_or_default();
        ui.set_next_item_width(4.0 * ui.current_font_size());
        if let Some(_combo) = ui.begin_combo("##dir_browser_roots", &current_root) {
            for root in state.roots() {
                let selected = state.current_path().starts_with(root);
                if ui
                    .selectable_config(root.display().to_string())
                    .selected(selected)
                    .build()
                    && !selected
                {
                    events.push(BrowserEvent::SelectRoot(root.clone()));
                }
            }
        }
        ui.same_line();
    }

    for (i, (label, target)) in crumbs.into_iter().enumerate() {
        let _id = ui.push_id(i as i32);
        if i > 0 {
            ui.same_line();
        }
        if ui.small_button(&label) {
            events.push(BrowserEvent::SetPath(target));
        }
    }

    ui.same_line();
    if ui.small_button("*") {
        events.push(BrowserEvent::Refresh);
    }
}

fn draw_new_dir_popup(ui: &Ui, state: &mut DirectoryBrowserState, events: &mut Vec<BrowserEvent>) {
    let label = state.new_dir_popup_label();
    ui.same_line();
    if ui.small_button("+") {
        ui.open_popup(&label);
        state.new_dir_name.clear();
    }

    if let Some(_popup) = ui.begin_popup(&label) {
        ui.input_text("name", &mut state.new_dir_name).build();
        ui.same_line();
        if ui.button("ok") && !state.new_dir_name.trim().is_empty() {
            events.push(BrowserEvent::CreateDirectory(state.new_dir_name.clone()));
            ui.close_current_popup();
        }
    }
}
