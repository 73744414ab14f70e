/// Turns a key-value pair into the text used when a container is rendered.
///
/// Stringifiers are optional: a container without one can do everything except render itself.
/// Being a plain function pointer, a stringifier is [`Copy`], [`Send`] and [`Sync`] regardless of
/// `K` and `V`.
pub type Stringifier<K, V> = fn(&K, &V) -> String;
