// Example: dynamic heights, estimates replaced by measurements.
use recycle_list::{ListConfig, SizeModel, compute_range};

fn main() {
    let config = ListConfig::new(40).with_dynamic_height(true).with_overscan(1);
    let mut sizes = SizeModel::from_config(&config);
    sizes.replace(10_000, |i| if i % 10 == 0 { 120 } else { 40 });

    println!("estimated total_height={}", sizes.total_height());
    println!("window@0={:?}", compute_range(0, 400, config.overscan, &sizes));

    // Pretend the host measured the first rows after rendering them.
    for i in 0..8 {
        sizes.record_measured(i, 64);
    }
    println!("measured total_height={}", sizes.total_height());
    println!("offset_of(8)={}", sizes.offset_of(8));
    println!("row at 1_000={:?}", sizes.index_at_offset(1_000));
    println!("window@0={:?}", compute_range(0, 400, config.overscan, &sizes));
}
