/// Substring match over composed cache keys.
///
/// Callers query by any partial combination of the identity components
/// (e.g. tenant + item without pool id), so the semantics is deliberately
/// `contains`, never prefix or exact match. Operates over an owned
/// point-in-time snapshot of the key set, so a concurrent insert or
/// removal can never fail the walk.
pub(crate) fn matching_keys<I>(
    keys: I,
    needle: &str,
) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    keys.into_iter().filter(|key| key.contains(needle)).collect()
}
