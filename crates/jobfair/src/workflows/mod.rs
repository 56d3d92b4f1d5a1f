pub mod job_fair;
