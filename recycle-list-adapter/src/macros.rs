// Log shims over `tracing`. Without the `tracing` feature the arguments are dropped unexpanded.

macro_rules! vtrace {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "recycle_list_adapter", $($tt)*);
    }};
}

macro_rules! vdebug {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "recycle_list_adapter", $($tt)*);
    }};
}
