use hashbrown::HashSet;

use crate::event::DecayTree;

/// The descendants of a node flattened breadth first, starting with its
/// direct daughters
#[derive(Clone, Debug)]
pub struct Expansion {
  /// Tree indices in expansion order. A particle reachable along two paths
  /// appears twice.
  pub nodes: Vec<usize>,
  /// For each position, itself and its ancestors and descendants within the
  /// expansion, as positions
  pub relatives: Vec<HashSet<usize>>,
}

/// Flatten the subtree under `root`, excluding `root` itself
#[must_use]
pub fn expand(tree: &dyn DecayTree, root: usize) -> Expansion {
  let mut nodes = tree.daughters(root).to_vec();
  let mut ancestors = vec![Vec::<usize>::new(); nodes.len()];
  let mut descendants = vec![HashSet::<usize>::new(); nodes.len()];
  let mut cursor = 0;
  while cursor < nodes.len() {
    for &child in tree.daughters(nodes[cursor]) {
      let pos = nodes.len();
      nodes.push(child);
      let mut lineage = ancestors[cursor].clone();
      lineage.push(cursor);
      lineage.iter().for_each(|&a| {
        descendants[a].insert(pos);
      });
      ancestors.push(lineage);
      descendants.push(HashSet::new());
    }
    cursor += 1;
  }
  let relatives = (ancestors.into_iter().zip(descendants).enumerate())
    .map(|(pos, (anc, mut desc))| {
      desc.extend(anc);
      desc.insert(pos);
      desc
    })
    .collect();
  Expansion { nodes, relatives }
}

#[cfg(test)]
mod test {
  use hashbrown::HashSet;

  use super::expand;
  use crate::event::{Event, Particle};

  #[test]
  fn breadth_first_lineage() {
    // 0 -> (1 -> (3 -> 4)) 2
    let mut ev = Event::new();
    (0..5).for_each(|i| {
      ev.push(Particle::new(i, 0.0));
    });
    ev.adopt(0, 1);
    ev.adopt(0, 2);
    ev.adopt(1, 3);
    ev.adopt(3, 4);
    let exp = expand(&ev, 0);
    assert_eq!(exp.nodes, vec![1, 2, 3, 4]);
    assert_eq!(exp.relatives[0], HashSet::from([0, 2, 3]));
    assert_eq!(exp.relatives[1], HashSet::from([1]));
    assert_eq!(exp.relatives[2], HashSet::from([0, 2, 3]));
    assert_eq!(exp.relatives[3], HashSet::from([0, 2, 3]));
  }

  #[test]
  fn leaf_expands_to_nothing() {
    let mut ev = Event::new();
    ev.push(Particle::new(22, 0.0));
    let exp = expand(&ev, 0);
    assert!(exp.nodes.is_empty() && exp.relatives.is_empty());
  }
}
