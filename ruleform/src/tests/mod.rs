

// Evaluator tests
mod evaluator;
mod operations;
