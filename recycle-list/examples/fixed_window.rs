// Example: fixed-height window math and node recycling with a printing surface.
use recycle_list::{NodePool, RenderCache, SizeModel, Surface, compute_range};

#[derive(Default)]
struct Console {
    next_id: u32,
}

struct Line {
    id: u32,
    text: String,
}

impl Surface for Console {
    type Node = Line;

    fn create_node(&mut self) -> Line {
        self.next_id += 1;
        Line {
            id: self.next_id,
            text: String::new(),
        }
    }

    fn attach(&mut self, node: &mut Line) {
        println!("  attach #{} {:?}", node.id, node.text);
    }

    fn detach(&mut self, node: &mut Line) {
        println!("  detach #{} {:?}", node.id, node.text);
    }

    fn place(&mut self, _node: &mut Line, _top: u64, _height: u32) {}

    fn write_text(&mut self, node: &mut Line, text: &str) {
        node.text.clear();
        node.text.push_str(text);
    }
}

fn main() {
    let mut sizes = SizeModel::fixed(50);
    sizes.replace(1_000, |_| 50);

    let mut cache = RenderCache::<u64, Line>::new();
    let mut pool = NodePool::new(100);
    let mut console = Console::default();

    for scroll_offset in [0u64, 1_000, 1_050] {
        let window = compute_range(scroll_offset, 300, 2, &sizes);
        println!("scroll_offset={scroll_offset} window={window:?}");
        let report = cache.reconcile(
            window,
            &sizes,
            &mut pool,
            &mut console,
            |i| i as u64,
            |surface, node, i| surface.write_text(node, &format!("row {i}")),
        );
        println!("  {report:?} pooled={}", pool.len());
    }

    println!("total_height={}", sizes.total_height());
}
