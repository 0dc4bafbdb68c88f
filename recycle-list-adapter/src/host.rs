use recycle_list::Surface;

/// How a programmatic scroll should be performed by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    /// Let the host decide (usually an instant jump).
    #[default]
    Auto,
    Instant,
    Smooth,
}

/// The scrollable container a list lives in.
///
/// The container owns the real scroll position and the viewport. It reports them on demand,
/// forwards its scroll/resize notifications to the controller's `on_*` entry points, and runs
/// one `on_frame` call after each `request_frame`.
pub trait ScrollContainer: Surface {
    /// Height of the visible area.
    fn viewport_size(&self) -> u32;

    /// Current scroll offset from the top of the content.
    fn scroll_offset(&self) -> u64;

    /// Asks the container to scroll. The controller does not wait for the scroll to happen;
    /// it picks up the new offset from the next scroll notification.
    fn scroll_to(&mut self, offset: u64, behavior: ScrollBehavior);

    /// Sets the height of the scrollable content so the scrollbar spans the whole list.
    fn set_content_height(&mut self, height: u64);

    /// Schedules a single `Controller::on_frame` call on the next display refresh.
    fn request_frame(&mut self);

    /// Whether the container is still part of the display tree.
    ///
    /// Notifications received while disconnected are ignored.
    fn is_connected(&self) -> bool {
        true
    }

    /// Starts delivering scroll/resize notifications. Called once by `Controller::create`.
    fn subscribe(&mut self) {}

    /// Stops delivering notifications. Called once by `Controller::destroy`.
    fn unsubscribe(&mut self) {}
}
