use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::config::DeleteDispatch;
use crate::registry::{BookField, Command};
use crate::ui::layout;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

const PAGE: usize = 10;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::Tick => {
            state.expire_status(Instant::now());
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        CEvent::Resize(_, height) => {
            state.set_viewport(layout::table_rows(height));
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // The modal captures all input while open
    if state.registry.modal_open() {
        return handle_form_key(state, key);
    }

    handle_table_key(state, key)
}

fn handle_table_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('q') => vec![Action::Quit],
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down(1);
            vec![]
        }
        KeyCode::PageUp => {
            state.move_up(PAGE);
            vec![]
        }
        KeyCode::PageDown => {
            state.move_down(PAGE);
            vec![]
        }
        KeyCode::Home => {
            state.move_home();
            vec![]
        }
        KeyCode::End => {
            state.move_end();
            vec![]
        }
        KeyCode::Char(' ') => match state.cursor_book() {
            Some(id) => run(state, Command::ToggleSelect(id)),
            None => noop(state),
        },
        KeyCode::Char('a') | KeyCode::Insert => run(state, Command::OpenAddModal),
        KeyCode::Enter | KeyCode::Char('e') => match state.cursor_book() {
            Some(id) => run(state, Command::OpenEditModal(id)),
            None => noop(state),
        },
        KeyCode::Char('d') | KeyCode::Delete => match state.cursor_book() {
            Some(id) => {
                let command = match state.config.behavior.delete_dispatch {
                    DeleteDispatch::Explicit => Command::DeleteOne(id),
                    DeleteDispatch::Legacy => Command::RequestDelete(id),
                };
                run(state, command)
            }
            None => noop(state),
        },
        KeyCode::Char('D') => run(state, Command::DeleteSelected),
        KeyCode::Char('1') => run(state, Command::SetSort(BookField::Name)),
        KeyCode::Char('2') => run(state, Command::SetSort(BookField::Price)),
        KeyCode::Char('3') => run(state, Command::SetSort(BookField::Category)),
        KeyCode::Char('4') => run(state, Command::SetSort(BookField::Description)),
        KeyCode::Char('0') => run(state, Command::ClearSort),
        _ => vec![],
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') => match state.registry.edit_target() {
                Some(id) => {
                    let command = match state.config.behavior.delete_dispatch {
                        DeleteDispatch::Explicit => Command::DeleteEditing,
                        DeleteDispatch::Legacy => Command::RequestDelete(id),
                    };
                    run(state, command)
                }
                None => noop(state),
            },
            KeyCode::Char('w') => {
                state.form.editor.delete_word_back();
                state.commit_editor();
                vec![]
            }
            _ => vec![],
        };
    }

    match key.code {
        KeyCode::Esc => run(state, Command::Cancel),
        KeyCode::Enter => run(state, Command::Submit),
        KeyCode::Tab | KeyCode::Down => {
            state.focus_next_field();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus_prev_field();
            vec![]
        }
        KeyCode::Left => {
            state.form.editor.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.form.editor.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.form.editor.move_home();
            vec![]
        }
        KeyCode::End => {
            state.form.editor.move_end();
            vec![]
        }
        KeyCode::Backspace => {
            state.form.editor.delete_back();
            state.commit_editor();
            vec![]
        }
        KeyCode::Delete => {
            state.form.editor.delete_forward();
            state.commit_editor();
            vec![]
        }
        KeyCode::Char(c) => {
            state.form.editor.insert_char(c);
            state.commit_editor();
            vec![]
        }
        _ => vec![],
    }
}

fn run(state: &mut AppState, command: Command) -> Vec<Action> {
    if state.dispatch(command).is_none() {
        return noop(state);
    }
    vec![]
}

fn noop(state: &AppState) -> Vec<Action> {
    if state.config.behavior.bell_on_noop {
        vec![Action::Bell]
    } else {
        vec![]
    }
}
