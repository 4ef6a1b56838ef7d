use weightsys_flow::StartFlow;

fn main() {
    let flow = match StartFlow::from_args() {
        Ok(flow) => flow,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    // Interfaces own the run loop, only one of them can be active.
    #[cfg(feature = "interface_sim")]
    {
        weightsys_sim::sim_main(flow).unwrap();
    }
}
