pub mod contest;
pub mod contest_participant;
pub mod contest_problem;
pub mod problem;
pub mod solved_record;
pub mod submission;
pub mod test_case;
pub mod test_case_result;
