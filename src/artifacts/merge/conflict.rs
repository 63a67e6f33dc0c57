use bytes::Bytes;

const HEAD_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR: &[u8] = b"=======\n";
const END_MARKER: &[u8] = b">>>>>>>\n";

/// Both sides of a conflicting file, active first. An absent side
/// contributes nothing.
///
/// No newline is inserted after either side.
pub fn conflict_content(active: Option<&[u8]>, target: Option<&[u8]>) -> Bytes {
    let active = active.unwrap_or_default();
    let target = target.unwrap_or_default();

    let mut content = Vec::with_capacity(
        HEAD_MARKER.len() + active.len() + SEPARATOR.len() + target.len() + END_MARKER.len(),
    );
    content.extend_from_slice(HEAD_MARKER);
    content.extend_from_slice(active);
    content.extend_from_slice(SEPARATOR);
    content.extend_from_slice(target);
    content.extend_from_slice(END_MARKER);

    Bytes::from(content)
}
