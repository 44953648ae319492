//! A thin trait unifying `Network` and `RemovableNetwork` so that the
//! Dijkstra family can run over either without caring which.

use std::sync::Arc;

use butterfly_common::{Coordinate, StopId};

use crate::edge::Edge;
use crate::network::Network;
use crate::removable_network::RemovableNetwork;

pub trait Graph {
    fn adjacent(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_>;
    fn adjacent_rev(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_>;
    fn node_ids(&self) -> Box<dyn Iterator<Item = StopId> + '_>;
    fn contains(&self, id: StopId) -> bool;
    fn coord(&self, id: StopId) -> Option<Coordinate>;
    fn len(&self) -> usize;
}

impl Graph for Network {
    fn adjacent(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_> {
        Box::new(self.adjacent(id).iter())
    }

    fn adjacent_rev(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_> {
        Box::new(self.adjacent_rev(id).iter())
    }

    fn node_ids(&self) -> Box<dyn Iterator<Item = StopId> + '_> {
        Box::new(self.node_ids())
    }

    fn contains(&self, id: StopId) -> bool {
        self.contains(id)
    }

    fn coord(&self, id: StopId) -> Option<Coordinate> {
        self.node(id).map(|s| s.coord)
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl Graph for RemovableNetwork {
    fn adjacent(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_> {
        Box::new(self.adjacent(id))
    }

    fn adjacent_rev(&self, id: StopId) -> Box<dyn Iterator<Item = &Arc<Edge>> + '_> {
        Box::new(self.adjacent_rev(id))
    }

    fn node_ids(&self) -> Box<dyn Iterator<Item = StopId> + '_> {
        Box::new(self.node_ids())
    }

    fn contains(&self, id: StopId) -> bool {
        self.contains(id)
    }

    fn coord(&self, id: StopId) -> Option<Coordinate> {
        self.node(id).map(|s| s.coord)
    }

    fn len(&self) -> usize {
        self.len()
    }
}
