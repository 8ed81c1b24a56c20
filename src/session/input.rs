use crate::session::state::Session;

/// Capture one typed character into the answer buffer. Letters are lowercased
/// and anything beyond the current word's length is dropped.
pub fn process_char(session: &mut Session, ch: char) -> bool {
    if !session.is_playing() || !ch.is_alphabetic() {
        return false;
    }

    let lowered = ch.to_lowercase();
    let typed = session.input.chars().count();
    if typed + lowered.len() > session.word_len() {
        return false;
    }

    session.input.extend(lowered);
    true
}

pub fn process_backspace(session: &mut Session) -> bool {
    if !session.is_playing() {
        return false;
    }
    session.input.pop().is_some()
}
