//! Lookup of the available algorithms by name, e.g. to populate a menu of a driver.

use super::*;

/// Named [`StepAlgorithm`] prototypes in registration order
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn StepAlgorithm>>,
}

impl Default for AlgorithmRegistry {
    /// Registry holding every algorithm of this crate
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(BreadthFirstSearch::new()));
        registry.register(Box::new(DepthFirstSearch::new()));
        registry.register(Box::new(StronglyConnectedComponents::new()));
        registry.register(Box::new(HamiltonianCycle::new()));
        registry.register(Box::new(HamiltonianPath::new()));
        registry.register(Box::new(Kruskal::new()));
        registry
    }
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry without any algorithm
    pub fn empty() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    /// Adds `algorithm`, replacing a previous one of the same name
    pub fn register(&mut self, algorithm: Box<dyn StepAlgorithm>) {
        match self.position(algorithm.name()) {
            Some(i) => self.algorithms[i] = algorithm,
            None => self.algorithms.push(algorithm),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn StepAlgorithm> {
        let i = self.position(name)?;
        Some(self.algorithms[i].as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn StepAlgorithm + 'static)> {
        let i = self.position(name)?;
        Some(self.algorithms[i].as_mut())
    }

    /// Names of all algorithms in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Forgets the progress of every algorithm
    pub fn reset_all(&mut self) {
        for algorithm in &mut self.algorithms {
            algorithm.reset();
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.algorithms.iter().position(|a| a.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::tests::graph_from_edges;

    #[test]
    fn default_algorithms() {
        let registry = AlgorithmRegistry::new();
        assert_eq!(
            registry.names(),
            vec![
                "Breadth First Search",
                "Depth First Search",
                "Strongly Connected Components",
                "Hamiltonian Cycle",
                "Hamiltonian Path",
                "Kruskal's Algorithm"
            ]
        );
        assert!(registry.get("Dijkstra").is_none());
        assert!(AlgorithmRegistry::empty().is_empty());
    }

    #[test]
    fn drive_by_name() {
        let (mut graph, _) = graph_from_edges(3, &[(0, 1, "2"), (1, 2, "1"), (2, 0, "3")]);
        let mut registry = AlgorithmRegistry::new();

        let kruskal = registry.get_mut("Kruskal's Algorithm").unwrap();
        kruskal.run_to_completion(&mut graph).unwrap();
        assert!(kruskal.is_finished());

        let scc = registry.get_mut("Strongly Connected Components").unwrap();
        scc.step(&mut graph).unwrap();
        assert!(scc.is_finished());

        registry.reset_all();
        assert!(!registry.get("Kruskal's Algorithm").unwrap().is_finished());
        assert!(!registry.get("Strongly Connected Components").unwrap().is_finished());
    }

    #[test]
    fn registering_replaces() {
        let mut registry = AlgorithmRegistry::new();
        registry.register(Box::new(Kruskal::new()));
        assert_eq!(registry.len(), 6);
    }
}
