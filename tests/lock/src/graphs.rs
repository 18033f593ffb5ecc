//! Small random weighted digraphs with brute-force ground truth.

use waypoint_kernel::carrier::codec::StateCodec;
use waypoint_kernel::carrier::key::{CodecError, KeyWriter, StateKey};
use waypoint_search::contract::{SearchWorld, Transition};

/// Fixed-seed linear congruential generator. Reproducible across platforms.
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    /// Uniform-ish value in `0..n`.
    pub fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// A digraph over nodes `0..nodes` searched from 0 to `goal`.
#[derive(Debug, Clone)]
pub struct SmallGraph {
    pub nodes: u8,
    pub edges: Vec<(u8, u8, u64)>,
    pub goal: u8,
    /// Per-node heuristic; all zeros unless [`SmallGraph::with_half_distance_heuristic`].
    pub heuristic: Vec<u64>,
}

impl SmallGraph {
    /// Random graph with 2 to 8 nodes, roughly one ordered pair in three
    /// connected, costs 0 to 9.
    #[must_use]
    pub fn random(rng: &mut Lcg) -> Self {
        let nodes = 2 + rng.below(7) as u8;
        let mut edges = Vec::new();
        for from in 0..nodes {
            for to in 0..nodes {
                if from != to && rng.below(3) == 0 {
                    edges.push((from, to, rng.below(10)));
                }
            }
        }
        Self {
            nodes,
            edges,
            goal: nodes - 1,
            heuristic: vec![0; usize::from(nodes)],
        }
    }

    /// Replace the heuristic with half the true distance to the goal
    /// (rounded down). Consistent on every edge that can lie on a path to
    /// the goal; dead ends read 0.
    #[must_use]
    pub fn with_half_distance_heuristic(mut self) -> Self {
        let heuristic = (0..self.nodes)
            .map(|n| self.brute_force_from(n).map_or(0, |d| d / 2))
            .collect();
        self.heuristic = heuristic;
        self
    }

    /// Cheapest cost from node 0 to the goal by enumerating simple paths.
    #[must_use]
    pub fn brute_force(&self) -> Option<u64> {
        self.brute_force_from(0)
    }

    fn brute_force_from(&self, start: u8) -> Option<u64> {
        let mut visited = vec![false; usize::from(self.nodes)];
        self.dfs(start, &mut visited)
    }

    fn dfs(&self, at: u8, visited: &mut [bool]) -> Option<u64> {
        if at == self.goal {
            return Some(0);
        }
        visited[usize::from(at)] = true;
        let candidates: Vec<(u8, u64)> = self
            .edges
            .iter()
            .filter(|&&(from, to, _)| from == at && !visited[usize::from(to)])
            .map(|&(_, to, cost)| (to, cost))
            .collect();
        let best = candidates
            .into_iter()
            .filter_map(|(to, cost)| self.dfs(to, visited).map(|rest| rest + cost))
            .min();
        visited[usize::from(at)] = false;
        best
    }
}

impl StateCodec for SmallGraph {
    type Config = u8;

    fn encode(&self, node: &u8) -> StateKey {
        let mut w = KeyWriter::with_capacity(1);
        w.put_u8(*node);
        w.finish()
    }

    fn decode(&self, key: &StateKey) -> Result<u8, CodecError> {
        let mut r = key.reader();
        let node = r.u8()?;
        r.finish()?;
        if node >= self.nodes {
            return Err(CodecError::InvalidField {
                field: "node",
                value: i64::from(node),
            });
        }
        Ok(node)
    }
}

impl SearchWorld for SmallGraph {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "small_graph"
    }

    fn expand(&self, node: &u8) -> Vec<Transition<u8>> {
        self.edges
            .iter()
            .filter(|(from, _, _)| from == node)
            .map(|&(_, to, cost)| Transition::new(cost, to))
            .collect()
    }

    fn heuristic(&self, node: &u8) -> u64 {
        self.heuristic[usize::from(*node)]
    }

    fn is_goal(&self, node: &u8) -> bool {
        *node == self.goal
    }
}
