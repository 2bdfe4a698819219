pub mod vector_index;
