pub mod letter_distance;
