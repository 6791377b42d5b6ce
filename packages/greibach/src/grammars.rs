pub mod builder;
pub mod context_free;
pub mod erasing_productions;
pub mod greibach_normal_form;
pub mod left_recursion;
pub mod options;
pub mod parser;
pub mod production;
