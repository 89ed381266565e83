mod token_counter_test;
