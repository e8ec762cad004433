use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use glob::glob;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use puzzle_search::algorithms::bfs::BfsSolver;
use puzzle_search::algorithms::dfs::DfsSolver;
use puzzle_search::problems::maze_2d::Maze2DProblem;
use puzzle_search::solver::Solver;

fn bfs(problem: &Maze2DProblem) -> usize {
    match problem.puzzle() {
        Some(start) => BfsSolver::new().solve(start).len(),
        None => 0,
    }
}

fn dfs(problem: &Maze2DProblem) -> usize {
    match problem.puzzle() {
        Some(start) => DfsSolver::new().solve(start).len(),
        None => 0,
    }
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Maze2D Search");

    for path in glob("data/problems/maze_2d/*.txt")
        .unwrap()
        .filter_map(std::result::Result::ok)
    {
        let name = path.file_name().unwrap().to_str().unwrap();
        let path: &std::path::Path = path.as_ref();
        let base_problem = Maze2DProblem::try_from(path).unwrap();
        let (x, y) = base_problem.space().dimensions();

        for i in 0..5 {
            let instance_name = format!("{name}[{x}x{y}]:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);

            if let Some(problem) = base_problem.randomize(&mut rng, 1, 1) {
                if let Some(start) = problem.puzzle() {
                    let mut bfs_search = BfsSolver::new();
                    let solution = bfs_search.solve(start);
                    println!("BFS path: {} moves. Path: {}", solution.moves(), solution);
                    bfs_search.print_stats().unwrap();
                }

                group.bench_with_input(BenchmarkId::new("BFS", &instance_name), &problem, |b, p| {
                    b.iter(|| bfs(p))
                });
                group.bench_with_input(BenchmarkId::new("DFS", &instance_name), &problem, |b, p| {
                    b.iter(|| dfs(p))
                });
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
