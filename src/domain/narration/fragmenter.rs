/// Characters that close a speakable fragment
pub const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', ';'];

/// A speakable unit of the input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// 0-based position in the fragment sequence, stable for the whole run
    pub index: usize,
    pub text: String,
}

/// Split text into fragments at sentence terminators.
///
/// The scan accumulates characters into a buffer; `.` `!` `?` `;` close the
/// buffer and emit it trimmed. A terminator with no speakable content before
/// it emits nothing. Text left in the buffer at end of input is emitted
/// without a terminator. After segmentation, every `.` in every fragment
/// except the last is softened to `,` so the engine does not render a full
/// stop at each seam.
///
/// `max_length` is a target, not a limit: fragments that exceed it are
/// logged and emitted whole, since there is no safe place to cut a span
/// that contains no terminator.
pub fn fragmentize(text: &str, max_length: usize) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut buffer = String::new();

    for ch in text.chars() {
        if SENTENCE_TERMINATORS.contains(&ch) {
            if !buffer.trim().is_empty() {
                buffer.push(ch);
                push_fragment(&mut fragments, &buffer, max_length);
            }
            buffer.clear();
        } else {
            buffer.push(ch);
        }
    }
    if !buffer.trim().is_empty() {
        push_fragment(&mut fragments, &buffer, max_length);
    }

    let last = fragments.len().saturating_sub(1);
    for fragment in fragments.iter_mut().take(last) {
        fragment.text = fragment.text.replace('.', ",");
    }

    fragments
}

fn push_fragment(fragments: &mut Vec<Fragment>, buffer: &str, max_length: usize) {
    let text = buffer.trim().to_string();
    let length = text.chars().count();
    if length > max_length {
        tracing::warn!(
            length,
            max_length,
            preview = %text.chars().take(80).collect::<String>(),
            "fragment exceeds the length target and will be synthesized whole"
        );
    }
    fragments.push(Fragment {
        index: fragments.len(),
        text,
    });
}
