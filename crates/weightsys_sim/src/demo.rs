use std::io::Write;

use weightsys_core::prelude::*;

fn print_state<W: Write>(out: &mut W, step: &str, ws: &WeightSystem<&str>) -> std::io::Result<()> {
    writeln!(
        out,
        "{}\n  total {:.3}, avg {:.3}",
        step,
        ws.total_weight(),
        ws.avg_weight()
    )?;
    for entry in ws.sorted_weights() {
        writeln!(out, "  {}", entry)?;
    }
    Ok(())
}

/// Walks through adding, rewarding, removing and clamping on a default system.
pub fn run_demo<W: Write>(out: &mut W) -> std::io::Result<WeightSystem<&'static str>> {
    let mut ws = WeightSystem::default();
    writeln!(out, "bounds [{}, {}]", ws.min_weight(), ws.max_weight())?;

    ws.add_items(["a", "b", "c"], AddItemOptions::default());
    print_state(out, "add a, b, c", &ws)?;

    ws.adjust_weight("a", true);
    print_state(out, "success on a", &ws)?;

    ws.add_item("d", AddItemOptions::with_weight(1000.0));
    print_state(out, "add d with weight 1000", &ws)?;

    ws.adjust_weight("d", true);
    print_state(out, "success on d, already at max", &ws)?;

    ws.remove_item(&"d");
    print_state(out, "remove d", &ws)?;

    ws.add_item("e", AddItemOptions::with_weight(ws.min_weight()));
    ws.adjust_weight("e", false);
    print_state(out, "failure on e, already at min", &ws)?;

    writeln!(out, "random pick: {}", ws.get_item())?;
    Ok(ws)
}

#[cfg(test)]
mod test_demo {
    use super::*;

    #[test]
    fn demo_ends_in_expected_state() {
        let mut out = Vec::new();
        let ws = run_demo(&mut out).unwrap();
        assert_eq!(ws.len(), 4);
        assert!(!ws.contains(&"d"));
        assert_eq!(ws.weight(&"e"), Some(1.0));
        assert!((ws.weight(&"a").unwrap() - 550.55).abs() < 1e-6);
        assert!((ws.total_weight() - 1552.55).abs() < 1e-6);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a: 550.550"));
        assert!(text.contains("random pick: "));
    }
}
