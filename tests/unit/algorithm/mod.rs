mod exclusion;
