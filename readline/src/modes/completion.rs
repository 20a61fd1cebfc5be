// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab completion. The completion scope is the run of non delimiter characters that
//! ends at point. Candidates come from the registered completer, and when it offers
//! none (or there is no completer) and filesystem completion is on, from the entries
//! of the folder named by the scope.

use crate::{CommandOutcome, ModeState};
use std::{fs, path::Path};
use unicode_segmentation::UnicodeSegmentation;

/// Upper bound on completer calls for one attempt, in case a completer never
/// returns `None`.
const MAX_CANDIDATES: usize = 10_000;

/// Compute `begidx` / `endidx` for point and return the text between them.
pub fn completion_scope(state: &mut ModeState) -> String {
    let end = state.buffer.point();
    let graphemes: Vec<&str> = state.buffer.text().graphemes(true).collect();
    let mut begin = end;
    while begin > 0 && !state.completer_delims.contains(graphemes[begin - 1]) {
        begin -= 1;
    }
    state.begidx = begin;
    state.endidx = end;
    graphemes[begin..end].concat()
}

#[must_use]
pub fn collect_candidates(state: &ModeState, text: &str) -> Vec<String> {
    let mut candidates = vec![];
    if let Some(completer) = &state.completer {
        for index in 0..MAX_CANDIDATES {
            match completer(text, index) {
                Some(it) => candidates.push(it),
                None => break,
            }
        }
    }
    if candidates.is_empty() && state.complete_filesystem {
        candidates = filesystem_candidates(text, state.mark_directories);
    }
    candidates.dedup();
    candidates
}

/// Folder entries matching `text`. Hidden entries are only offered when the prefix
/// starts with a dot.
#[must_use]
pub fn filesystem_candidates(text: &str, mark_directories: bool) -> Vec<String> {
    let (folder_part, prefix) = match text.rfind('/') {
        Some(at) => (&text[..=at], &text[at + 1..]),
        None => ("", text),
    };
    let folder = if folder_part.is_empty() {
        Path::new(".")
    } else {
        Path::new(folder_part)
    };

    let Ok(read_dir) = fs::read_dir(folder) else {
        return vec![];
    };
    let mut candidates: Vec<String> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.'))
            {
                return None;
            }
            let is_dir = entry.file_type().is_ok_and(|it| it.is_dir());
            let suffix = if is_dir && mark_directories { "/" } else { "" };
            Some(format!("{folder_part}{name}{suffix}"))
        })
        .collect();
    candidates.sort();
    candidates
}

#[must_use]
pub fn common_prefix(candidates: &[String]) -> String {
    let Some(first) = candidates.first() else {
        return String::new();
    };
    let mut len = first.len();
    for candidate in &candidates[1..] {
        len = first
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((at, ch), _)| at + ch.len_utf8())
            .min(len);
    }
    first[..len].to_string()
}

fn replace_scope(state: &mut ModeState, replacement: &str) {
    state.buffer.delete_range(state.begidx, state.endidx);
    state.buffer.set_point(state.begidx);
    state.buffer.insert_str(replacement);
}

/// `complete`: one candidate replaces the scope, several insert their common prefix
/// and are listed when `show_all_if_ambiguous` is on.
pub fn complete(state: &mut ModeState) -> CommandOutcome {
    let text = completion_scope(state);
    let candidates = collect_candidates(state, &text);
    match candidates.as_slice() {
        [] => CommandOutcome::Bell,
        [only] => {
            replace_scope(state, only);
            CommandOutcome::Continue
        }
        _ => {
            let prefix = common_prefix(&candidates);
            let extended = prefix.len() > text.len();
            if extended {
                replace_scope(state, &prefix);
            }
            if state.show_all_if_ambiguous {
                CommandOutcome::ShowCompletions(candidates)
            } else if extended {
                CommandOutcome::Continue
            } else {
                CommandOutcome::Bell
            }
        }
    }
}

/// `possible_completions`: list the candidates without editing the line.
pub fn possible_completions(state: &mut ModeState) -> CommandOutcome {
    let text = completion_scope(state);
    let candidates = collect_candidates(state, &text);
    if candidates.is_empty() {
        CommandOutcome::Bell
    } else {
        CommandOutcome::ShowCompletions(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestClipboard;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn state_with_words(words: &'static [&'static str], line: &str) -> ModeState {
        let mut state = ModeState::new();
        state.kill_ring.set_clipboard(Box::new(TestClipboard::default()));
        state.completer = Some(Arc::new(move |text: &str, index: usize| {
            words
                .iter()
                .filter(|it| it.starts_with(text))
                .nth(index)
                .map(ToString::to_string)
        }));
        state.buffer.set_text(line);
        state
    }

    #[test]
    fn test_scope_stops_at_delims() {
        let mut state = state_with_words(&[], "echo $HOME/fo");
        assert_eq!(completion_scope(&mut state), "HOME/fo");
        assert_eq!((state.begidx, state.endidx), (6, 13));
    }

    #[test]
    fn test_single_candidate_replaces_scope() {
        let mut state = state_with_words(&["print", "exit"], "x = pri");
        assert_eq!(complete(&mut state), CommandOutcome::Continue);
        assert_eq!(state.buffer.text(), "x = print");
        assert_eq!(state.buffer.point(), 9);
    }

    #[test]
    fn test_ambiguous_inserts_prefix_then_lists_or_bells() {
        let mut state = state_with_words(&["import", "imports", "impl"], "im");
        assert_eq!(complete(&mut state), CommandOutcome::Continue);
        assert_eq!(state.buffer.text(), "imp");

        assert_eq!(complete(&mut state), CommandOutcome::Bell);

        state.show_all_if_ambiguous = true;
        assert_eq!(
            complete(&mut state),
            CommandOutcome::ShowCompletions(vec![
                "import".into(),
                "imports".into(),
                "impl".into()
            ])
        );
    }

    #[test]
    fn test_no_candidates_bells() {
        let mut state = state_with_words(&["a"], "zz");
        assert_eq!(complete(&mut state), CommandOutcome::Bell);
        assert_eq!(possible_completions(&mut state), CommandOutcome::Bell);
    }

    #[test]
    fn test_filesystem_fallback_marks_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::write(dir.path().join("alphabet.txt"), "").unwrap();
        std::fs::write(dir.path().join(".alps"), "").unwrap();
        let base = format!("{}/", dir.path().display());

        let it = filesystem_candidates(&format!("{base}al"), true);
        assert_eq!(it, vec![format!("{base}alpha/"), format!("{base}alphabet.txt")]);

        let it = filesystem_candidates(&format!("{base}al"), false);
        assert_eq!(it, vec![format!("{base}alpha"), format!("{base}alphabet.txt")]);

        let it = filesystem_candidates(&format!("{base}.al"), false);
        assert_eq!(it, vec![format!("{base}.alps")]);
    }

    #[test]
    fn test_common_prefix() {
        assert_eq!(common_prefix(&["abc".into(), "abd".into()]), "ab");
        assert_eq!(common_prefix(&["x".into(), "y".into()]), "");
        assert_eq!(common_prefix(&["héllo".into(), "hél".into()]), "hél");
        assert_eq!(common_prefix(&[]), "");
    }
}
