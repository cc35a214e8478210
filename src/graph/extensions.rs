use crate::graph::{
    amplify::{Amplify, Gain},
    node::GraphNode,
};

/// Fluent combinators so patches read left to right.
pub trait NodeExt: GraphNode + Sized {
    fn amplify<M: GraphNode>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn gain(self, level: f32) -> Gain<Self> {
        Gain::new(self, level)
    }
}

impl<T: GraphNode> NodeExt for T {}
