use preflow_push::maximum_flow::graph::Graph;
use preflow_push::maximum_flow::minimum_cut::{cut_capacity, minimum_cut};
use preflow_push::maximum_flow::push_relabel_fifo::PushRelabelFIFO;
use preflow_push::maximum_flow::push_relabel_to_front::PushRelabelToFront;

fn main() {
    let mut graph = Graph::default();
    graph.add_nodes(4);

    let edges = vec![
        graph.add_directed_edge(0, 1, 10).unwrap(),
        graph.add_directed_edge(0, 2, 10).unwrap(),
        graph.add_directed_edge(1, 3, 10).unwrap(),
        graph.add_directed_edge(2, 3, 10).unwrap(),
        graph.add_directed_edge(1, 2, 1).unwrap(),
    ];

    let mut fifo = PushRelabelFIFO::default();
    match fifo.solve(0, 3, &mut graph.clone()) {
        Ok(flow) => println!("fifo maximum flow:{} {:?}", flow, fifo.stats()),
        Err(err) => println!("fifo failed: {err}"),
    }

    let mut to_front = PushRelabelToFront::default();
    match to_front.solve(0, 3, &mut graph) {
        Ok(flow) => {
            println!("relabel-to-front maximum flow:{} {:?}", flow, to_front.stats());
            for edge_id in edges {
                println!("{:?}", graph.get_edge(edge_id).unwrap());
            }
            let cut = minimum_cut(&graph, &[0]);
            println!("minimum cut:{:?} capacity:{}", cut, cut_capacity(&graph, &cut));
        }
        Err(err) => println!("relabel-to-front failed: {err}"),
    }
}
