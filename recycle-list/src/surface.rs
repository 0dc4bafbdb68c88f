/// The display side of a list: creates, attaches and positions row nodes.
///
/// The engine never inspects a node. It only moves nodes between the surface, its rendered
/// cache and its pool, and asks the surface to place them at SizeModel offsets. A GUI adapter
/// would map these calls onto real widgets; a TUI adapter onto row buffers.
pub trait Surface {
    type Node;

    /// Creates a fresh, detached node. Called only when the pool is empty.
    fn create_node(&mut self) -> Self::Node;

    /// Makes `node` part of the visible content.
    fn attach(&mut self, node: &mut Self::Node);

    /// Removes `node` from the visible content. The node may be reused later.
    fn detach(&mut self, node: &mut Self::Node);

    /// Positions `node` at `top` with the given `height`.
    fn place(&mut self, node: &mut Self::Node, top: u64, height: u32);

    /// Replaces the node's content with plain text (used by the default renderer).
    fn write_text(&mut self, node: &mut Self::Node, text: &str);

    /// Frees a node that the pool had no room for.
    fn discard(&mut self, node: Self::Node) {
        drop(node);
    }
}
